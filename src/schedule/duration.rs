/// Delimiter between the start and end clock times of a shift label
pub const SHIFT_LABEL_DELIMITER: &str = " - ";

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Hours covered by a label like "09:00 - 13:00"
///
/// Malformed labels and end times before the start time count as zero hours
/// so one bad row never stops a month from being generated.
pub fn shift_duration(label: &str) -> f64 {
    let parts: Vec<&str> = label.trim().split(SHIFT_LABEL_DELIMITER).collect();
    if parts.len() != 2 {
        log::warn!("Shift label '{}' is not 'HH:MM - HH:MM', counting 0 hours", label);
        return 0.0;
    }

    match (parse_time_to_minutes(parts[0]), parse_time_to_minutes(parts[1])) {
        (Some(start), Some(end)) if end >= start => f64::from(end - start) / 60.0,
        (Some(_), Some(_)) => {
            log::warn!("Shift '{}' ends before it starts, counting 0 hours", label);
            0.0
        }
        _ => {
            log::warn!("Shift label '{}' has an invalid time, counting 0 hours", label);
            0.0
        }
    }
}

/// Builds the shift label from separate start and end times
pub fn format_shift_label(start: &str, end: &str) -> String {
    format!("{}{}{}", start.trim(), SHIFT_LABEL_DELIMITER, end.trim())
}
