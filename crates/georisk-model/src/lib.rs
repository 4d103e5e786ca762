pub mod aggregate;
pub mod options;
pub mod record;
pub mod roles;
pub mod zone;

pub use aggregate::{AggregateTable, DwellingType, RentAggregate, SourceKind, ZoneAggregate};
pub use options::{DayOrder, OutputOptions, PipelineOptions};
pub use record::{AlertLevel, RiskLevel, UnifiedZoneRecord};
pub use roles::{SemanticColumnMap, SemanticRole};
pub use zone::{NO_INFO_KEY, ZoneKey, ZoneTier};
