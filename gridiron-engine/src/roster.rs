//! Players, ratings and the skill-position groupings the simulator reads.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::ids::{PlayerId, TeamId};

/// Power figure used for a team with nobody on its roster.
pub const EMPTY_ROSTER_POWER: f64 = 60.0;

const OVERALL_WEIGHT: f64 = 0.6;
const DETAIL_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Ol,
    Dl,
    Lb,
    Cb,
    S,
    K,
    P,
}

impl Position {
    /// Short roster code, e.g. `QB`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Qb => "QB",
            Self::Rb => "RB",
            Self::Wr => "WR",
            Self::Te => "TE",
            Self::Ol => "OL",
            Self::Dl => "DL",
            Self::Lb => "LB",
            Self::Cb => "CB",
            Self::S => "S",
            Self::K => "K",
            Self::P => "P",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Optional sub-ratings scouted for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRatings {
    pub speed: u8,
    pub acceleration: u8,
    pub agility: u8,
    pub strength: u8,
    pub hands: u8,
    pub endurance: u8,
    pub intelligence: u8,
    pub discipline: u8,
}

impl DetailedRatings {
    /// Same value in every category.
    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self {
            speed: value,
            acceleration: value,
            agility: value,
            strength: value,
            hands: value,
            endurance: value,
            intelligence: value,
            discipline: value,
        }
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        let total: u32 = [
            self.speed,
            self.acceleration,
            self.agility,
            self.strength,
            self.hands,
            self.endurance,
            self.intelligence,
            self.discipline,
        ]
        .iter()
        .map(|v| u32::from(*v))
        .sum();
        f64::from(total) / 8.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: Option<TeamId>,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub overall_rating: u8,
    #[serde(default)]
    pub detailed: Option<DetailedRatings>,
}

impl Player {
    /// Rating the simulator ranks and weighs players by: a 60/40 blend of
    /// overall and the mean sub-rating when scouted, overall otherwise.
    #[must_use]
    pub fn sim_rating(&self) -> f64 {
        let overall = f64::from(self.overall_rating);
        match &self.detailed {
            Some(detail) => OVERALL_WEIGHT * overall + DETAIL_WEIGHT * detail.mean(),
            None => overall,
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for adding a player to a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub overall_rating: u8,
    #[serde(default)]
    pub detailed: Option<DetailedRatings>,
}

impl NewPlayer {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: Position,
        overall_rating: u8,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            position,
            overall_rating,
            detailed: None,
        }
    }

    #[must_use]
    pub const fn with_detail(mut self, detailed: DetailedRatings) -> Self {
        self.detailed = Some(detailed);
        self
    }
}

/// Mean simulation rating of a roster.
#[must_use]
pub fn team_power(roster: &[Player]) -> f64 {
    if roster.is_empty() {
        return EMPTY_ROSTER_POWER;
    }
    let total: f64 = roster.iter().map(Player::sim_rating).sum();
    total / crate::numbers::usize_to_f64(roster.len())
}

pub type PlayerGroup = SmallVec<[Player; 3]>;

/// Top-rated skill players of a roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillGroups {
    pub quarterbacks: PlayerGroup,
    pub running_backs: PlayerGroup,
    pub receivers: PlayerGroup,
    pub tight_ends: PlayerGroup,
}

impl SkillGroups {
    /// One QB, two RBs, three WRs and one TE, each ranked by
    /// [`Player::sim_rating`] with player id breaking rating ties.
    #[must_use]
    pub fn from_roster(roster: &[Player]) -> Self {
        Self {
            quarterbacks: top_at(roster, Position::Qb, 1),
            running_backs: top_at(roster, Position::Rb, 2),
            receivers: top_at(roster, Position::Wr, 3),
            tight_ends: top_at(roster, Position::Te, 1),
        }
    }

    /// Ball carriers: running backs first, then the quarterback, capped at two.
    #[must_use]
    pub fn rushers(&self) -> PlayerGroup {
        self.running_backs
            .iter()
            .chain(self.quarterbacks.iter().take(1))
            .take(2)
            .cloned()
            .collect()
    }

    /// Pass catchers: wide receivers first, then the tight end, capped at three.
    #[must_use]
    pub fn targets(&self) -> PlayerGroup {
        self.receivers
            .iter()
            .chain(self.tight_ends.iter())
            .take(3)
            .cloned()
            .collect()
    }
}

fn top_at(roster: &[Player], position: Position, limit: usize) -> PlayerGroup {
    let mut candidates: Vec<&Player> = roster.iter().filter(|p| p.position == position).collect();
    candidates.sort_by(|a, b| {
        b.sim_rating()
            .total_cmp(&a.sim_rating())
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, position: Position, overall: u8) -> Player {
        Player {
            id: PlayerId(id),
            team: Some(TeamId(1)),
            first_name: format!("P{id}"),
            last_name: "Test".into(),
            position,
            overall_rating: overall,
            detailed: None,
        }
    }

    #[test]
    fn sim_rating_blends_detail_when_present() {
        let mut p = player(1, Position::Qb, 80);
        assert!((p.sim_rating() - 80.0).abs() < f64::EPSILON);
        p.detailed = Some(DetailedRatings::uniform(60));
        assert!((p.sim_rating() - 72.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roster_uses_baseline_power() {
        assert!((team_power(&[]) - EMPTY_ROSTER_POWER).abs() < f64::EPSILON);
        let roster = vec![player(1, Position::Qb, 70), player(2, Position::Rb, 90)];
        assert!((team_power(&roster) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn groups_rank_by_blended_rating() {
        let mut scouted = player(3, Position::Wr, 70);
        scouted.detailed = Some(DetailedRatings::uniform(99));
        let roster = vec![
            player(1, Position::Wr, 75),
            player(2, Position::Wr, 60),
            scouted,
            player(4, Position::Wr, 74),
            player(5, Position::Qb, 65),
            player(6, Position::Qb, 85),
        ];
        let groups = SkillGroups::from_roster(&roster);
        let wr_ids: Vec<u32> = groups.receivers.iter().map(|p| p.id.get()).collect();
        assert_eq!(wr_ids, vec![3, 1, 4]);
        assert_eq!(groups.quarterbacks.len(), 1);
        assert_eq!(groups.quarterbacks[0].id, PlayerId(6));
        assert!(groups.running_backs.is_empty());
    }

    #[test]
    fn rushers_fall_back_to_quarterback() {
        let roster = vec![player(1, Position::Rb, 70), player(2, Position::Qb, 80)];
        let groups = SkillGroups::from_roster(&roster);
        let ids: Vec<u32> = groups.rushers().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn targets_include_tight_end_after_receivers() {
        let roster = vec![
            player(1, Position::Te, 90),
            player(2, Position::Wr, 70),
            player(3, Position::Wr, 65),
        ];
        let groups = SkillGroups::from_roster(&roster);
        let ids: Vec<u32> = groups.targets().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
