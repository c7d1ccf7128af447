use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A stored test-bench configuration.
///
/// Speed limits are in km/h, waits and intervals in seconds. `temperature`
/// and `time` are the thresholds that switch the auxiliary output (AUX1).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub is_default: bool,
    pub number: i32,
    pub time_between_cycles: i32,
    pub upper_limit: i32,
    pub inferior_limit: i32,
    pub upper_time: i32,
    pub inferior_time: i32,
    pub disable_shutdown: bool,
    pub enable_output: bool,
    pub temperature: f64,
    pub time: f64,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
