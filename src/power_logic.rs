/// Decide whether the die should save its seed and enter deep sleep.
///
/// `idle_ticks` counts consecutive ticks with the button up, the face at
/// rest and no blink running.
pub fn should_power_down(power_down_enabled: bool, idle_ticks: u32, timeout_ticks: u32) -> bool {
    power_down_enabled && idle_ticks >= timeout_ticks
}

/// Decide whether the die is inside the last `warning_ticks` before
/// power-down, so the indicator segment can announce it.
pub fn should_warn_power_down(
    power_down_enabled: bool,
    idle_ticks: u32,
    timeout_ticks: u32,
    warning_ticks: u32,
) -> bool {
    power_down_enabled
        && idle_ticks < timeout_ticks
        && idle_ticks.saturating_add(warning_ticks) >= timeout_ticks
}
