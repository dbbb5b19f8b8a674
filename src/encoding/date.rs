// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Conversion between wire dates and UTC instants.
//!
//! Both formats carry a date as a double of milliseconds since the Unix
//! epoch. Decoded dates keep whole seconds only, truncated toward zero.

use chrono::{DateTime, Utc};

use crate::core::{AmfError, Result};

/// Convert wire milliseconds to a UTC instant, dropping sub-second parts.
pub fn date_from_millis(millis: f64, context: &str) -> Result<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(AmfError::framing(
            context,
            format!("date is not a finite number: {millis}"),
        ));
    }

    let secs = (millis / 1000.0).trunc();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return Err(AmfError::framing(
            context,
            format!("date {millis}ms is out of range"),
        ));
    }

    DateTime::from_timestamp(secs as i64, 0)
        .ok_or_else(|| AmfError::framing(context, format!("date {millis}ms is out of range")))
}

/// Milliseconds since the Unix epoch as written on the wire.
pub fn date_to_millis(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64
}
