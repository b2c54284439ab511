//! 广告位
//!
//! - `resolver`: 按 (区域, 版位) 查找投放中的广告，失败视为无结果
//! - `slot`: 单次挂载的广告位状态机，曝光每次挂载只记录一次
//! - `counter`: 曝光/点击计数缓冲，批量刷写，失败不影响调用方

pub mod counter;
pub mod resolver;
pub mod slot;

pub use counter::{AdCounter, AdCounterManager, AdTelemetry, CounterKind, CounterSink, MountId};
pub use resolver::{AdSource, AdView, SlotOutcome, resolve_slot};
pub use slot::{AdSlot, LoadTicket, SlotState, SlotView};
