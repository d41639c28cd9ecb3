/// Color bucket for a user link, derived from the user's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Unrated,
    Gray,
    Brown,
    Green,
    Cyan,
    Blue,
    Yellow,
    Orange,
    Red,
}

impl RatingTier {
    pub fn from_rate(rate: Option<i32>) -> Self {
        let Some(rate) = rate else {
            return Self::Unrated;
        };
        if rate >= 2800 {
            Self::Red
        } else if rate >= 2400 {
            Self::Orange
        } else if rate >= 2000 {
            Self::Yellow
        } else if rate >= 1600 {
            Self::Blue
        } else if rate >= 1200 {
            Self::Cyan
        } else if rate >= 800 {
            Self::Green
        } else if rate >= 400 {
            Self::Brown
        } else {
            Self::Gray
        }
    }

    /// Class list the host page puts on a user link of this tier.
    pub fn link_class(self) -> &'static str {
        match self {
            Self::Unrated => "user-link",
            Self::Gray => "user-link user-link-gray",
            Self::Brown => "user-link user-link-brown",
            Self::Green => "user-link user-link-green",
            Self::Cyan => "user-link user-link-cyan",
            Self::Blue => "user-link user-link-blue",
            Self::Yellow => "user-link user-link-yellow",
            Self::Orange => "user-link user-link-orange",
            Self::Red => "user-link user-link-red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RatingTier;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(RatingTier::from_rate(Some(2800)), RatingTier::Red);
        assert_eq!(RatingTier::from_rate(Some(2799)), RatingTier::Orange);
        assert_eq!(RatingTier::from_rate(Some(2400)), RatingTier::Orange);
        assert_eq!(RatingTier::from_rate(Some(2000)), RatingTier::Yellow);
        assert_eq!(RatingTier::from_rate(Some(1600)), RatingTier::Blue);
        assert_eq!(RatingTier::from_rate(Some(1200)), RatingTier::Cyan);
        assert_eq!(RatingTier::from_rate(Some(800)), RatingTier::Green);
        assert_eq!(RatingTier::from_rate(Some(400)), RatingTier::Brown);
        assert_eq!(RatingTier::from_rate(Some(399)), RatingTier::Gray);
    }

    #[test]
    fn zero_rating_is_gray_not_unrated() {
        assert_eq!(RatingTier::from_rate(Some(0)), RatingTier::Gray);
        assert_eq!(RatingTier::from_rate(Some(-50)), RatingTier::Gray);
    }

    #[test]
    fn missing_rating_uses_neutral_link() {
        let tier = RatingTier::from_rate(None);
        assert_eq!(tier, RatingTier::Unrated);
        assert_eq!(tier.link_class(), "user-link");
    }

    #[test]
    fn link_class_names_the_tier() {
        assert_eq!(
            RatingTier::from_rate(Some(3000)).link_class(),
            "user-link user-link-red"
        );
        assert_eq!(
            RatingTier::from_rate(Some(100)).link_class(),
            "user-link user-link-gray"
        );
    }
}
