/// Terminal classification of a finished test case.
///
/// Closed set. Wire values are fixed by the log format; tag 4 is reserved
/// (it carried `skipped` in earlier log versions) and must not be reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Status {
    Ambiguous = 0,
    Failed = 1,
    Passed = 2,
    Pending = 3,
    Undefined = 5,
}

impl Status {
    pub const ALL: [Self; 5] = [
        Self::Passed,
        Self::Failed,
        Self::Pending,
        Self::Ambiguous,
        Self::Undefined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ambiguous => "ambiguous",
            Self::Failed => "failed",
            Self::Passed => "passed",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        assert_eq!(Status::Ambiguous as i32, 0);
        assert_eq!(Status::Failed as i32, 1);
        assert_eq!(Status::Passed as i32, 2);
        assert_eq!(Status::Pending as i32, 3);
        assert_eq!(Status::Undefined as i32, 5);
    }

    #[test]
    fn reserved_tag_is_rejected() {
        assert!(Status::try_from(4).is_err());
        assert!(Status::try_from(-1).is_err());
        assert!(Status::try_from(6).is_err());
    }

    #[test]
    fn every_status_converts_back() {
        for status in Status::ALL {
            assert_eq!(Status::try_from(status as i32).unwrap(), status);
        }
    }

    #[test]
    fn only_passed_is_success() {
        let successes: Vec<_> = Status::ALL.into_iter().filter(|s| s.is_success()).collect();
        assert_eq!(successes, vec![Status::Passed]);
    }

    #[test]
    fn display_uses_lowercase_name() {
        assert_eq!(Status::Undefined.to_string(), "undefined");
    }
}
