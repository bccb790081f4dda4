pub fn log_format(title: &str, content: &str) -> String {
    format!(
        "\n*** *** *** [{}] *** *** ***\n{}\n*** *** *** [{}] *** *** ***\n\n",
        title, content, title
    )
}

const FATAL_TITLE: &str = "TUXRACER ACTIVITY FATAL";

/// Logs `msg` as an error record before panicking, so it reaches logcat and the crash
/// reporter even when the panic hook never gets to run.
#[track_caller]
pub fn fatal(msg: &str, detail: Option<&dyn std::fmt::Debug>) -> ! {
    let content = match detail {
        Some(detail) => format!("{}: {:?}", msg, detail),
        None => msg.to_string(),
    };
    let framed = log_format(FATAL_TITLE, &content);
    log::error!("{}", framed);
    panic!("{}", framed)
}

/// Unwraps or ends the activity through [`fatal`].
/// Only for conditions the activity cannot survive, everything else is logged and skipped.
pub trait ActivityExpectation<T> {
    fn etr_expect(self, msg: &str) -> T;
}

impl<T, E> ActivityExpectation<T> for Result<T, E>
where
    E: std::fmt::Debug,
{
    #[track_caller]
    fn etr_expect(self, msg: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => fatal(msg, Some(&err)),
        }
    }
}

impl<T> ActivityExpectation<T> for Option<T> {
    #[track_caller]
    fn etr_expect(self, msg: &str) -> T {
        match self {
            Some(value) => value,
            None => fatal(msg, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_frame_message_with_title() {
        let formatted = log_format("BOOT", "display queried");
        assert!(formatted.starts_with("\n*** *** *** [BOOT] *** *** ***\n"));
        assert!(formatted.contains("\ndisplay queried\n"));
        assert!(formatted.ends_with("*** *** *** [BOOT] *** *** ***\n\n"));
    }

    #[test]
    fn should_pass_through_ok_and_some() {
        let value: Result<u32, String> = Ok(7);
        assert_eq!(value.etr_expect("unreachable"), 7);
        assert_eq!(Some("x").etr_expect("unreachable"), "x");
    }

    #[test]
    #[should_panic(expected = "TUXRACER ACTIVITY FATAL")]
    fn should_panic_with_framed_message() {
        let value: Option<u32> = None;
        value.etr_expect("No event loop");
    }

    #[test]
    #[should_panic(expected = "Failed to create event loop: \"no window\"")]
    fn should_carry_error_detail_into_panic() {
        let value: Result<u32, &str> = Err("no window");
        value.etr_expect("Failed to create event loop");
    }
}
