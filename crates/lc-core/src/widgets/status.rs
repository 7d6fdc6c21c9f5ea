/// Badge tone for an installment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Danger,
}

impl BadgeTone {
    pub fn for_status(status: &str) -> Self {
        if status == "Paid" {
            BadgeTone::Success
        } else {
            BadgeTone::Danger
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Success => "badge bg-success",
            BadgeTone::Danger => "badge bg-danger",
        }
    }
}

/// Dot colour for a transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Green,
    Orange,
    Red,
}

impl IndicatorColor {
    pub fn for_status(status: &str) -> Self {
        match status {
            "Success" => IndicatorColor::Green,
            "Pending" => IndicatorColor::Orange,
            _ => IndicatorColor::Red,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            IndicatorColor::Green => "green",
            IndicatorColor::Orange => "orange",
            IndicatorColor::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paid_is_green_badge() {
        assert_eq!(BadgeTone::for_status("Paid"), BadgeTone::Success);
        assert_eq!(BadgeTone::for_status("paid"), BadgeTone::Danger);
        assert_eq!(BadgeTone::for_status("Pending"), BadgeTone::Danger);
    }

    #[test]
    fn indicator_colours() {
        assert_eq!(IndicatorColor::for_status("Success").css(), "green");
        assert_eq!(IndicatorColor::for_status("Pending").css(), "orange");
        assert_eq!(IndicatorColor::for_status("Rejected").css(), "red");
        assert_eq!(IndicatorColor::for_status("").css(), "red");
    }
}
