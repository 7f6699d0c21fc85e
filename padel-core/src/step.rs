//! Wizard step identities and positions.
use std::fmt::Debug;

/// A finite, ordered set of input steps.
pub trait WizardStep: Copy + Eq + Debug + 'static {
    /// Every ordinal step, in wizard order. Must not be empty.
    const ALL: &'static [Self];

    /// Route segment for this step.
    fn slug(self) -> &'static str;

    /// Short heading shown above the step view.
    fn label(self) -> &'static str;

    /// Draft fields this step is allowed to read and write.
    fn fields(self) -> &'static [&'static str];

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|step| step.slug() == slug)
    }

    /// Zero-based index into [`WizardStep::ALL`].
    fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }

    fn owns_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }
}

pub const START_SLUG: &str = "start";
pub const TERMINAL_SLUG: &str = "final";

/// Where a wizard currently is: before the first step, on an ordinal step,
/// or on the terminal confirmation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPosition<S> {
    Start,
    Step(S),
    Terminal,
}

impl<S: WizardStep> StepPosition<S> {
    #[must_use]
    pub fn first() -> Self {
        S::ALL.first().map_or(Self::Terminal, |step| Self::Step(*step))
    }

    #[must_use]
    pub fn last_ordinal() -> Self {
        S::ALL.last().map_or(Self::Start, |step| Self::Step(*step))
    }

    /// The following position; the last ordinal step maps to `Terminal`.
    /// `None` once terminal.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::first()),
            Self::Step(step) => Some(
                S::ALL
                    .get(step.ordinal() + 1)
                    .map_or(Self::Terminal, |next| Self::Step(*next)),
            ),
            Self::Terminal => None,
        }
    }

    /// The preceding position. `None` on the first step and before it.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Start => None,
            Self::Step(step) => step
                .ordinal()
                .checked_sub(1)
                .and_then(|idx| S::ALL.get(idx))
                .map(|prev| Self::Step(*prev)),
            Self::Terminal => Some(Self::last_ordinal()),
        }
    }

    #[must_use]
    pub fn step(self) -> Option<S> {
        match self {
            Self::Step(step) => Some(step),
            Self::Start | Self::Terminal => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Start => START_SLUG,
            Self::Step(step) => step.slug(),
            Self::Terminal => TERMINAL_SLUG,
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            START_SLUG => Some(Self::Start),
            TERMINAL_SLUG => Some(Self::Terminal),
            other => S::from_slug(other).map(Self::Step),
        }
    }

    /// One-based progress index; terminal counts as `ALL.len() + 1`.
    #[must_use]
    pub fn progress(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Step(step) => step.ordinal() + 1,
            Self::Terminal => S::ALL.len() + 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnboardingStep {
    Name,
    Gender,
    Nationality,
    Photo,
}

impl WizardStep for OnboardingStep {
    const ALL: &'static [Self] = &[Self::Name, Self::Gender, Self::Nationality, Self::Photo];

    fn slug(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Nationality => "nationality",
            Self::Photo => "photo",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "What's your name?",
            Self::Gender => "How do you identify?",
            Self::Nationality => "Where are you from?",
            Self::Photo => "Add a profile photo",
        }
    }

    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["first_name", "last_name"],
            Self::Gender => &["gender"],
            Self::Nationality => &["nationality"],
            Self::Photo => &["profile_photo"],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentStep {
    Details,
    Venue,
    Format,
    Bracket,
    Capacity,
    Schedule,
}

impl WizardStep for TournamentStep {
    const ALL: &'static [Self] = &[
        Self::Details,
        Self::Venue,
        Self::Format,
        Self::Bracket,
        Self::Capacity,
        Self::Schedule,
    ];

    fn slug(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Venue => "venue",
            Self::Format => "format",
            Self::Bracket => "bracket",
            Self::Capacity => "capacity",
            Self::Schedule => "schedule",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Details => "Name your tournament",
            Self::Venue => "Where will it be played?",
            Self::Format => "Pick a match format",
            Self::Bracket => "Choose a bracket",
            Self::Capacity => "How many teams?",
            Self::Schedule => "When does it start?",
        }
    }

    fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Details => &["name", "description"],
            Self::Venue => &["venue"],
            Self::Format => &["format"],
            Self::Bracket => &["bracket_type"],
            Self::Capacity => &["max_teams"],
            Self::Schedule => &["start_date"],
        }
    }
}
