//! Domain primitives, ports and the accrual service.
//!
//! Public surface:
//! - `User`, `UserDraft`, `PassportReference`, `Pagination` for user records.
//! - `Task`, `TaskStatus`, `NewTask`, `ActiveTask`, `TaskFilter` for tasks.
//! - `Error` / `ErrorCode`, the transport-agnostic failure payload.
//! - `ports`, the storage traits implemented by outbound adapters.
//! - `accrual`, the periodic earnings loop.

pub mod accrual;
pub mod error;
pub mod ports;
pub mod task;
pub mod trace_id;
pub mod user;

pub use self::accrual::{AccrualConfig, AccrualReport, EarningsAccrual, RateDivision};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::task::{
    ActiveTask, NewTask, Task, TaskFilter, TaskId, TaskSort, TaskStatus, UnknownStatusToken,
};
pub use self::trace_id::TraceId;
pub use self::user::{PassportFormatError, PassportReference, Pagination, User, UserDraft, UserId};
