use crate::error::{Result, SyncError};
use crate::model::{format_cost, Id, Ingredient, IngredientPatch, Recipe, RecipePatch};
use crate::sync::MutationOutcome;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Field name to raw text as typed by the user.
pub type Draft = BTreeMap<String, String>;

pub const NAME_FIELD: &str = "name";
pub const COST_FIELD: &str = "approxCost";

/// An entity whose fields can be buffered in an [`EditSession`].
pub trait Editable {
    type Patch: Send + 'static;

    /// Draft seeded from the committed values.
    fn seed_draft(&self) -> Draft;
    /// Turns the draft into the partial update sent to the service.
    fn patch_from_draft(draft: &Draft) -> Result<Self::Patch>;
}

/// Where an edit session commits its draft.
#[async_trait::async_trait]
pub trait UpdateTarget<E: Editable>: Send + Sync {
    async fn commit(&self, id: &Id, patch: E::Patch) -> Result<MutationOutcome>;
}

/// Parses a cost field. Anything that is not a finite number is refused
/// before a request is made.
pub fn parse_cost(field: &str, input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SyncError::InvalidNumber {
            field: field.to_string(),
            input: input.to_string(),
        }),
    }
}

impl Editable for Ingredient {
    type Patch = IngredientPatch;

    fn seed_draft(&self) -> Draft {
        Draft::from([(NAME_FIELD.to_string(), self.name.clone())])
    }

    fn patch_from_draft(draft: &Draft) -> Result<IngredientPatch> {
        Ok(IngredientPatch {
            name: draft.get(NAME_FIELD).cloned(),
        })
    }
}

impl Editable for Recipe {
    type Patch = RecipePatch;

    fn seed_draft(&self) -> Draft {
        Draft::from([
            (NAME_FIELD.to_string(), self.name.clone()),
            (COST_FIELD.to_string(), format_cost(self.approx_cost)),
        ])
    }

    fn patch_from_draft(draft: &Draft) -> Result<RecipePatch> {
        let aproxim_cost = draft
            .get(COST_FIELD)
            .map(|text| parse_cost(COST_FIELD, text))
            .transpose()?;
        Ok(RecipePatch {
            name: draft.get(NAME_FIELD).cloned(),
            aproxim_cost,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Viewing,
    Editing(Draft),
}

/// Per-item edit state. The draft only exists while editing and survives a
/// failed save untouched.
#[derive(Debug, Clone)]
pub struct EditSession<E> {
    entity_id: Id,
    mode: EditMode,
    last_failure: Option<String>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Editable> EditSession<E> {
    pub fn new(entity_id: impl Into<Id>) -> Self {
        Self {
            entity_id: entity_id.into(),
            mode: EditMode::Viewing,
            last_failure: None,
            _entity: PhantomData,
        }
    }

    pub fn entity_id(&self) -> &Id {
        &self.entity_id
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            EditMode::Editing(draft) => Some(draft),
            EditMode::Viewing => None,
        }
    }

    /// Why the last save did not leave edit mode, if it didn't.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Enters edit mode seeded from `entity`. Does nothing while already
    /// editing so an in-progress draft is never overwritten.
    pub fn start_edit(&mut self, entity: &E) {
        if self.is_editing() {
            return;
        }
        debug!("editing {}", self.entity_id);
        self.mode = EditMode::Editing(entity.seed_draft());
        self.last_failure = None;
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let EditMode::Editing(draft) = &mut self.mode else {
            return Err(SyncError::NotEditing);
        };
        match draft.get_mut(field) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(SyncError::UnknownField(field.to_string())),
        }
    }

    /// Commits the draft. Accepted leaves edit mode; a rejection, an invalid
    /// number or a transport failure keeps the draft as it was.
    pub async fn save<T>(&mut self, target: &T) -> Result<MutationOutcome>
    where
        T: UpdateTarget<E> + ?Sized,
    {
        let EditMode::Editing(draft) = &self.mode else {
            return Err(SyncError::NotEditing);
        };

        let result = match E::patch_from_draft(draft) {
            Ok(patch) => target.commit(&self.entity_id, patch).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(MutationOutcome::Accepted) => {
                self.mode = EditMode::Viewing;
                self.last_failure = None;
            }
            Ok(outcome @ MutationOutcome::Rejected { .. }) => {
                self.last_failure = Some(outcome.to_string());
            }
            Err(e) => {
                warn!("saving {} failed: {}", self.entity_id, e);
                self.last_failure = Some(e.to_string());
            }
        }
        result
    }

    /// The Edit/Save button: starts editing, or saves when already editing.
    pub async fn toggle<T>(&mut self, entity: &E, target: &T) -> Result<Option<MutationOutcome>>
    where
        T: UpdateTarget<E> + ?Sized,
    {
        if self.is_editing() {
            self.save(target).await.map(Some)
        } else {
            self.start_edit(entity);
            Ok(None)
        }
    }

    /// Drops the session together with any draft, e.g. when its item is deleted.
    pub fn discard(self) {
        debug!("discarding edit session for {}", self.entity_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Records every commit and answers with a fixed outcome.
    struct FakeTarget<P> {
        outcome: MutationOutcome,
        commits: Mutex<Vec<(Id, P)>>,
    }

    impl<P> FakeTarget<P> {
        fn answering(outcome: MutationOutcome) -> Self {
            Self {
                outcome,
                commits: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl<E: Editable> UpdateTarget<E> for FakeTarget<E::Patch> {
        async fn commit(&self, id: &Id, patch: E::Patch) -> Result<MutationOutcome> {
            self.commits.lock().push((id.clone(), patch));
            Ok(self.outcome.clone())
        }
    }

    fn soup() -> Recipe {
        Recipe {
            id: "r1".to_string(),
            name: "Soup".to_string(),
            preparation_time: 0.0,
            approx_cost: 5.0,
            ingredient_ids: Vec::new(),
        }
    }

    fn rejected() -> MutationOutcome {
        MutationOutcome::Rejected {
            status: 500,
            reason: "boom".to_string(),
        }
    }

    #[test]
    fn test_draft_only_exists_while_editing() {
        let recipe = soup();
        let mut session = EditSession::<Recipe>::new("r1");
        assert!(session.draft().is_none());
        assert!(matches!(session.set_field(NAME_FIELD, "x"), Err(SyncError::NotEditing)));

        session.start_edit(&recipe);
        let draft = session.draft().unwrap();
        assert_eq!(draft[NAME_FIELD], "Soup");
        assert_eq!(draft[COST_FIELD], "5.00");
    }

    #[test]
    fn test_start_edit_keeps_existing_draft() {
        let recipe = soup();
        let mut session = EditSession::<Recipe>::new("r1");
        session.start_edit(&recipe);
        session.set_field(NAME_FIELD, "Stew").unwrap();
        session.start_edit(&recipe);
        assert_eq!(session.draft().unwrap()[NAME_FIELD], "Stew");
    }

    #[test]
    fn test_unknown_field() {
        let mut session = EditSession::<Ingredient>::new("i1");
        session.start_edit(&Ingredient {
            id: "i1".to_string(),
            name: "Salt".to_string(),
        });
        assert!(matches!(
            session.set_field(COST_FIELD, "1"),
            Err(SyncError::UnknownField(_))
        ));
    }

    #[tokio::test]
    async fn test_unchanged_save_sends_original_values() {
        let recipe = soup();
        let target = FakeTarget::<RecipePatch>::answering(MutationOutcome::Accepted);
        let mut session = EditSession::<Recipe>::new("r1");

        session.start_edit(&recipe);
        let outcome = session.save(&target).await.unwrap();

        assert!(outcome.is_accepted());
        assert_eq!(session.mode(), &EditMode::Viewing);
        let commits = target.commits.lock();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].0, "r1");
        assert_eq!(
            commits[0].1,
            RecipePatch {
                name: Some("Soup".to_string()),
                aproxim_cost: Some(5.0),
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_draft() {
        let recipe = soup();
        let target = FakeTarget::<RecipePatch>::answering(rejected());
        let mut session = EditSession::<Recipe>::new("r1");

        session.start_edit(&recipe);
        session.set_field(NAME_FIELD, "Stew").unwrap();
        session.set_field(COST_FIELD, "7.25").unwrap();
        let before = session.draft().cloned();

        let outcome = session.save(&target).await.unwrap();

        assert!(!outcome.is_accepted());
        assert!(session.is_editing());
        assert_eq!(session.draft().cloned(), before);
        assert!(session.last_failure().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_non_numeric_cost_is_refused_locally() {
        let recipe = soup();
        let target = FakeTarget::<RecipePatch>::answering(MutationOutcome::Accepted);
        let mut session = EditSession::<Recipe>::new("r1");

        session.start_edit(&recipe);
        session.set_field(COST_FIELD, "five").unwrap();
        let err = session.save(&target).await.unwrap_err();

        assert!(matches!(err, SyncError::InvalidNumber { .. }));
        assert!(session.is_editing());
        assert_eq!(session.draft().unwrap()[COST_FIELD], "five");
        assert!(target.commits.lock().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_starts_then_saves() {
        let salt = Ingredient {
            id: "i1".to_string(),
            name: "Salt".to_string(),
        };
        let target = FakeTarget::<IngredientPatch>::answering(MutationOutcome::Accepted);
        let mut session = EditSession::<Ingredient>::new("i1");

        assert_eq!(session.toggle(&salt, &target).await.unwrap(), None);
        assert!(session.is_editing());
        session.set_field(NAME_FIELD, "Sea salt").unwrap();

        let outcome = session.toggle(&salt, &target).await.unwrap();
        assert_eq!(outcome, Some(MutationOutcome::Accepted));
        assert!(!session.is_editing());
        assert_eq!(target.commits.lock()[0].1, IngredientPatch::name("Sea salt"));
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost(COST_FIELD, " 4.50 ").unwrap(), 4.5);
        assert!(parse_cost(COST_FIELD, "").is_err());
        assert!(parse_cost(COST_FIELD, "NaN").is_err());
        assert!(parse_cost(COST_FIELD, "inf").is_err());
        assert!(parse_cost(COST_FIELD, "4.5abc").is_err());
    }
}
