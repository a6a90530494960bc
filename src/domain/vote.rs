/// Aggregate vote classification implied by comparing the two counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorityLabel {
    Fake,
    Real,
    Unclear,
}

impl std::fmt::Display for MajorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MajorityLabel::Fake => write!(f, "Fake"),
            MajorityLabel::Real => write!(f, "Real"),
            MajorityLabel::Unclear => write!(f, "Unclear"),
        }
    }
}

/// Equal counts are `Unclear`; otherwise the larger counter wins.
pub fn majority_label(fake: u64, real: u64) -> MajorityLabel {
    if fake == real {
        MajorityLabel::Unclear
    } else if fake > real {
        MajorityLabel::Fake
    } else {
        MajorityLabel::Real
    }
}

/// Rounded percentage of fake votes. The denominator is clamped to 1 so
/// that two zero counters yield 0 rather than a division by zero.
pub fn fake_percent(fake: u64, real: u64) -> u32 {
    let total = (fake + real).max(1);
    ((fake as f64 / total as f64) * 100.0).round() as u32
}

/// Fake/real counts contributed by local-only comments, blended into
/// displayed tallies without touching the server-sourced counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteDelta {
    pub fake: u64,
    pub real: u64,
}
