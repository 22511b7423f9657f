/// Outcome of reconciling a configured device name against the ports
/// that are actually available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceNameResolution {
    /// The configured name is available as-is.
    Configured,
    /// The configured name is gone, but exactly one available port
    /// differs from it only in its final character. The caller should
    /// persist the corrected name.
    Corrected(String),
    /// No available port matches closely enough, or several do.
    Unresolved,
}

/// Reconcile a configured device name against the available ports.
///
/// Some backends suffix port names with an index that changes across
/// restarts, so when the exact name is gone we compare all but the last
/// character. This is a policy for that naming convention, not a general
/// similarity match.
pub fn resolve_device_name(configured: &str, available: &[String]) -> DeviceNameResolution {
    if configured.is_empty() {
        return DeviceNameResolution::Unresolved;
    }

    if available.iter().any(|name| name == configured) {
        return DeviceNameResolution::Configured;
    }

    let mut candidates = available
        .iter()
        .filter(|name| stem(name) == stem(configured));

    match (candidates.next(), candidates.next()) {
        (Some(only), None) => DeviceNameResolution::Corrected(only.clone()),
        _ => DeviceNameResolution::Unresolved,
    }
}

fn stem(name: &str) -> &str {
    match name.char_indices().last() {
        Some((index, _)) => &name[..index],
        None => name,
    }
}
