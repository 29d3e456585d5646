//! Operation boundary macros
//!
//! All three expand to one `tracing` event carrying `component` (the
//! calling module path), `op` and `event`, followed by any extra fields the
//! caller passes. Callers need `tracing` in their own dependency list.

#[doc(hidden)]
#[macro_export]
macro_rules! __dw_op_event {
    ($level:ident, $event:ident, $op:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation at info
///
/// ```
/// # use driftwatch_core::log_op_start;
/// log_op_start!("evaluate_batch");
/// log_op_start!("evaluate_batch", total = 3usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__dw_op_event!(info, EVENT_START, $op $(, $($field)*)?)
    };
}

/// Log the successful end of an operation at info
///
/// `duration_ms` is mandatory and comes first.
///
/// ```
/// # use driftwatch_core::log_op_end;
/// log_op_end!("evaluate_batch", duration_ms = 42u64, drifted = 0usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__dw_op_event!(info, EVENT_END, $op, duration_ms = $duration $(, $($field)*)?)
    };
}

/// Log an operation failure at error, with `err.kind` and `err.code`
///
/// `$err` is anything convertible into `DwError`.
///
/// ```
/// # use driftwatch_core::{log_op_error, DriftError};
/// let err = DriftError::InvalidConfig { reason: "bad".to_string() };
/// log_op_error!("load_config", err, duration_ms = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let dw_err: $crate::errors::DwError = $err.into();
        $crate::__dw_op_event!(
            error,
            EVENT_END_ERROR,
            $op,
            duration_ms = $duration,
            err.kind = ?dw_err.kind(),
            err.code = dw_err.code(),
            error = %dw_err
            $(, $($field)*)?
        )
    }};
}
