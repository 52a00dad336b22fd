use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a fixed option set whose wire and display form is its label.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Options in the order the wizard presents them.
            pub fn ordered() -> &'static [$name] {
                Self::ALL
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Case-insensitive lookup by label.
            pub fn from_label(label: &str) -> Option<Self> {
                let label = label.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(label))
            }

            /// One-based position as shown in numbered menus.
            pub fn from_choice(choice: usize) -> Option<Self> {
                choice.checked_sub(1).and_then(|index| Self::ALL.get(index).copied())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

option_set! {
    /// Current life stage.
    Status {
        SchoolStudent => "School Student",
        CollegeStudent => "College Student",
        RecentGraduate => "Recent Graduate",
        WorkingProfessional => "Working Professional",
    }
}

option_set! {
    FieldOfStudy {
        HighSchool => "High School",
        Engineering => "B.Tech (Engineering)",
        Commerce => "B.Com (Commerce)",
        Arts => "B.A. (Arts & Humanities)",
        Science => "B.Sc (Science)",
        Other => "Other",
    }
}

option_set! {
    /// Topics that feed the discovery feed.
    Interest {
        Technology => "Technology & Coding",
        Business => "Business & Finance",
        CreativeArts => "Creative Arts & Design",
        Media => "Media & Communication",
        Research => "Science & Research",
    }
}

option_set! {
    Goal {
        Exploring => "Just Exploring & Curious",
        ClearPath => "Find a Clear Career Path",
        Experience => "Get Real-World Experience",
    }
}
