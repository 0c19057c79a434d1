//! Macros for declaring closed state and trigger sets.

/// Generate a fieldless state enum with its `State` implementation.
///
/// Besides the trait impl the macro emits `Display` (using the variant's
/// label) and an `ALL` constant listing every variant in declaration order.
/// A variant may carry a display label with `=> "text"`; without one the
/// label is the variant name.
///
/// The enum derives serde traits, so the calling crate needs `serde`.
///
/// # Example
///
/// ```
/// use switchyard::core::State;
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum PhoneState {
///         OffHook => "off the hook",
///         Connecting => "connecting",
///         Connected,
///         Destroyed,
///     }
///     final: [Destroyed]
/// }
///
/// assert_eq!(PhoneState::OffHook.to_string(), "off the hook");
/// assert_eq!(PhoneState::Connected.label(), "Connected");
/// assert_eq!(PhoneState::ALL.len(), 4);
/// assert!(PhoneState::Destroyed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__variant_label!($variant $(, $label)?)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::label(self))
            }
        }
    };
}

/// Generate a fieldless trigger enum with its `Trigger` implementation.
///
/// Accepts the same `Variant => "label"` syntax as [`state_enum!`].
///
/// # Example
///
/// ```
/// use switchyard::trigger_enum;
///
/// trigger_enum! {
///     pub enum PhoneTrigger {
///         CallDialed => "call dialed",
///         HungUp => "hung up",
///     }
/// }
///
/// assert_eq!(PhoneTrigger::HungUp.to_string(), "hung up");
/// assert_eq!(PhoneTrigger::ALL, &[PhoneTrigger::CallDialed, PhoneTrigger::HungUp]);
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::Trigger for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__variant_label!($variant $(, $label)?)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::Trigger::label(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_label {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, Trigger};

    state_enum! {
        enum TestState {
            OffHook => "off the hook",
            Connecting => "connecting",
            Connected,
            Destroyed,
            Faulted,
        }
        final: [Destroyed, Faulted]
        error: [Faulted]
    }

    trigger_enum! {
        enum TestTrigger {
            CallDialed => "call dialed",
            LeftMessage,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::OffHook;
        assert_eq!(state.name(), "OffHook");
        assert_eq!(state.label(), "off the hook");
        assert!(!state.is_final());
        assert!(!state.is_error());

        assert!(TestState::Destroyed.is_final());
        assert!(!TestState::Destroyed.is_error());
        assert!(TestState::Faulted.is_final());
        assert!(TestState::Faulted.is_error());
    }

    #[test]
    fn unlabelled_variant_uses_its_name() {
        assert_eq!(TestState::Connected.label(), "Connected");
        assert_eq!(TestTrigger::LeftMessage.label(), "LeftMessage");
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(TestState::Connecting.to_string(), "connecting");
        assert_eq!(format!("{}", TestTrigger::CallDialed), "call dialed");
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(
            TestState::ALL,
            &[
                TestState::OffHook,
                TestState::Connecting,
                TestState::Connected,
                TestState::Destroyed,
                TestState::Faulted,
            ]
        );
        assert_eq!(TestTrigger::ALL.len(), 2);
        assert_eq!(TestTrigger::CallDialed.name(), "CallDialed");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        assert!(PublicState::B.is_final());
    }

    #[test]
    fn state_enum_works_without_final_error() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        let state = MinimalState::One;
        assert!(!state.is_final());
        assert!(!state.is_error());
    }
}
