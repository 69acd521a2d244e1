use sea_orm::entity::prelude::*;

/// Kind of moderation action recorded against a subject.
///
/// `Mute` is the only kind the scheduler ever fires; `Unmute` and
/// `Escalation` entries are audit records inserted already completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ActionKind {
    #[sea_orm(string_value = "mute")]
    Mute,
    #[sea_orm(string_value = "unmute")]
    Unmute,
    #[sea_orm(string_value = "escalation")]
    Escalation,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Mute => write!(f, "mute"),
            ActionKind::Unmute => write!(f, "unmute"),
            ActionKind::Escalation => write!(f, "escalation"),
        }
    }
}

/// Moderation audit log and scheduled-action store.
///
/// A row with `completed = false` is a pending scheduled action. A null
/// `fire_at` on a pending row means the action never fires on its own and
/// is only removed by explicit cancellation (indefinite restriction).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "moderation_action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subject_id: String,
    pub staff_id: String,
    pub kind: ActionKind,
    pub reason: Option<String>,
    pub completed: bool,
    pub fire_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
