use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{
    error::{AppError, AppResult},
    services::entity_store::{Collection, Resource},
};

/// Entity-specific form contents for the add/edit modal.
///
/// `Default` is the blank template used by "add".
pub trait Draft: Clone + Default + Send + Sync + 'static {
    type Entity: Resource;
    type Field: Copy + fmt::Debug + Send;
    /// Extra knobs validation depends on.
    type Rules: Send + Sync;

    /// Field-by-field owned copy of `entity`.
    fn from_entity(entity: &Self::Entity) -> Self;
    fn set(&mut self, field: Self::Field, value: String);
    fn validate(&self, rules: &Self::Rules) -> AppResult<()>;
    fn create_payload(&self) -> <Self::Entity as Resource>::Create;
    fn update_payload(&self) -> <Self::Entity as Resource>::Update;
}

/// Where the current draft came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Add,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Draft,
    Submitting,
}

struct OpenForm<D> {
    draft: D,
    origin: Origin,
    submitting: bool,
    error: Option<String>,
}

struct Inner<D> {
    form: Option<OpenForm<D>>,
    // Bumped on every open/cancel so a stale submit completion can tell
    // that the form it belonged to is gone.
    generation: u64,
}

enum Pending<R: Resource> {
    Create(R::Create),
    Update(i64, R::Update),
}

/// Add/edit modal state machine on top of one collection.
pub struct FormEditor<D, S>
where
    D: Draft,
    S: Collection<D::Entity> + ?Sized,
{
    store: Arc<S>,
    rules: D::Rules,
    inner: Mutex<Inner<D>>,
}

impl<D, S> FormEditor<D, S>
where
    D: Draft,
    S: Collection<D::Entity> + ?Sized,
{
    pub fn new(store: Arc<S>, rules: D::Rules) -> Self {
        Self {
            store,
            rules,
            inner: Mutex::new(Inner {
                form: None,
                generation: 0,
            }),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn open(&self, draft: D, origin: Origin) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.form = Some(OpenForm {
            draft,
            origin,
            submitting: false,
            error: None,
        });
        tracing::debug!(entity = noun::<D>(), ?origin, "form opened");
    }

    pub fn open_add(&self) {
        self.open(D::default(), Origin::Add);
    }

    pub fn open_edit(&self, entity: &D::Entity) {
        self.open(D::from_entity(entity), Origin::Edit(entity.id()));
    }

    pub fn field_change(&self, field: D::Field, value: impl Into<String>) -> AppResult<()> {
        let mut inner = self.inner.lock();
        let form = inner.form.as_mut().ok_or(AppError::EditorClosed)?;
        if form.submitting {
            return Err(AppError::SubmitInFlight);
        }
        form.draft.set(field, value.into());
        Ok(())
    }

    /// Close the form and drop the draft, saved or not.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        if inner.form.take().is_some() {
            tracing::debug!(entity = noun::<D>(), "form cancelled");
        }
    }

    /// Validate and save the draft.
    ///
    /// On success the form closes and the returned string is the notice to
    /// show. On failure the draft is kept exactly as typed and the error is
    /// also recorded in [`last_error`](Self::last_error).
    pub async fn submit(&self) -> AppResult<String> {
        let (pending, generation) = {
            let mut inner = self.inner.lock();
            let generation = inner.generation;
            let form = inner.form.as_mut().ok_or(AppError::EditorClosed)?;
            if form.submitting {
                return Err(AppError::SubmitInFlight);
            }
            if let Err(err) = form.draft.validate(&self.rules) {
                form.error = Some(err.to_string());
                return Err(err);
            }
            let pending: Pending<D::Entity> = match form.origin {
                Origin::Add => Pending::Create(form.draft.create_payload()),
                Origin::Edit(id) => Pending::Update(id, form.draft.update_payload()),
            };
            form.submitting = true;
            form.error = None;
            (pending, generation)
        };

        let (result, verb) = match &pending {
            Pending::Create(payload) => (self.store.create(payload).await, "created"),
            Pending::Update(id, payload) => (self.store.update(*id, payload).await, "updated"),
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!(
                entity = noun::<D>(),
                "submit finished after the form was closed"
            );
            return result.map(|_| notice::<D::Entity>(verb));
        }
        match result {
            Ok(()) => {
                inner.form = None;
                inner.generation += 1;
                Ok(notice::<D::Entity>(verb))
            }
            Err(err) => {
                if let Some(form) = inner.form.as_mut() {
                    form.submitting = false;
                    form.error = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    pub fn state(&self) -> EditorState {
        match &self.inner.lock().form {
            None => EditorState::Closed,
            Some(form) if form.submitting => EditorState::Submitting,
            Some(_) => EditorState::Draft,
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().form.is_some()
    }

    pub fn draft(&self) -> Option<D> {
        self.inner.lock().form.as_ref().map(|f| f.draft.clone())
    }

    pub fn origin(&self) -> Option<Origin> {
        self.inner.lock().form.as_ref().map(|f| f.origin)
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().form.as_ref().and_then(|f| f.error.clone())
    }
}

fn noun<D: Draft>() -> &'static str {
    <D::Entity as Resource>::NOUN
}

fn notice<R: Resource>(verb: &str) -> String {
    let mut chars = R::NOUN.chars();
    let noun = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{noun} {verb} successfully!")
}
