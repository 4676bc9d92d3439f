pub mod blocks;
pub mod label;
pub mod models;
pub mod pipeline;
pub mod row;
pub mod status;

pub use models::{
    CategoryBlock, CategoryDescriptor, CategoryStatus, CompetitionSnapshot, ParticipantEntry,
    RawCategoryBlock, RawRow, Sex,
};
pub use pipeline::parse_competition_page;
