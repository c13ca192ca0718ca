//! Builders for directory entities used across test modules.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{SkillList, Swap, SwapDraft, SwapId, SwapStatus, User, UserDraft, UserId};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 8, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn sample_user(name: &str, offered: &[&str], wanted: &[&str]) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        location: "Bengaluru".to_owned(),
        avatar_url: String::new(),
        skills_offered: SkillList::new(offered.iter().copied()),
        skills_wanted: SkillList::new(wanted.iter().copied()),
        availability: "Weekends".to_owned(),
        rating: 4.0,
        reviews: 2,
    })
    .expect("valid fixture user")
}

pub fn sample_swap(from: &UserId, to: &UserId, status: SwapStatus) -> Swap {
    let created_at = fixed_now() - chrono::TimeDelta::days(3);
    Swap::new(SwapDraft {
        id: SwapId::random(),
        from_user_id: from.clone(),
        to_user_id: to.clone(),
        status,
        created_at,
        updated_at: created_at,
    })
    .expect("valid fixture swap")
}
