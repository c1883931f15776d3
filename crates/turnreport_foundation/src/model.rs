//! The structured report model.
//!
//! These records mirror the structured document the parsers stream into a
//! [`ReportSink`](crate::sink::ReportSink). Field names are serialized in
//! camelCase so that a streamed document deserializes straight into a
//! [`Report`].

mod common;
mod region;
mod report;
mod unit;

pub use common::{Amount, Coords, Direction, EntityRef, FactionRef, Item, Ratio, Skill};
pub use region::{Exit, Gate, Population, Region, RegionStub, Settlement, SettlementSize, Wages, Weather};
pub use report::{
    Attitude, Attitudes, Battle, BattleRound, EngineInfo, Event, FactionInfo, FactionStatus, Lore,
    OrdersTemplate, Report, TurnDate, UnitOrders,
};
pub use unit::{Capacity, FleetContent, Structure, Unit};
