// Order-independent grouping and frequency ranking of side compositions.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{Side, TeamCode};
use crate::store::DraftResultRecord;

/// How many compositions a ranking shows unless told otherwise.
pub const DEFAULT_RANKING_LIMIT: usize = 20;

const KEY_DELIMITER: &str = ",";

/// Canonical key for a line-up: the team codes sorted as strings and joined
/// with commas, so any acquisition order of the same five teams gives the
/// same key (e.g. `"BFX,DK,GEN,NS,T1"`).
pub fn composition_key(teams: &[TeamCode]) -> String {
    let mut codes: Vec<&str> = teams.iter().map(|t| t.code()).collect();
    codes.sort_unstable();
    codes.join(KEY_DELIMITER)
}

/// How often one line-up occurred on one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionStat {
    /// `"{side}-{n}"`, where `n` is the order in which the key was first seen.
    pub id: String,
    pub composition_key: String,
    pub team_type: Side,
    /// The first record's line-up with this key, in acquisition order.
    pub teams: Vec<TeamCode>,
    pub count: usize,
    /// Share of all records, 0..=100.
    pub percentage: f64,
}

impl CompositionStat {
    /// Percentage rounded to one decimal place, e.g. `"66.7"`.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

/// Rankings for both sides over the same history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllStats {
    pub baron: Vec<CompositionStat>,
    pub elder: Vec<CompositionStat>,
    pub total_count: usize,
}

impl AllStats {
    pub fn side(&self, side: Side) -> &[CompositionStat] {
        match side {
            Side::Baron => &self.baron,
            Side::Elder => &self.elder,
        }
    }
}

struct Group {
    key: String,
    teams: Vec<TeamCode>,
    count: usize,
}

/// Rank the line-ups of `side` across `records` by frequency.
///
/// Groups keep the order in which their key was first seen; the sort by count
/// is stable, so equal counts stay in that order. At most `limit` entries are
/// returned.
pub fn aggregate_compositions(
    records: &[DraftResultRecord],
    side: Side,
    limit: usize,
) -> Vec<CompositionStat> {
    let mut groups: Vec<Group> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let teams = record.side_teams(side);
        match by_key.entry(composition_key(teams)) {
            Entry::Occupied(slot) => groups[*slot.get()].count += 1,
            Entry::Vacant(slot) => {
                groups.push(Group {
                    key: slot.key().clone(),
                    teams: teams.to_vec(),
                    count: 1,
                });
                slot.insert(groups.len() - 1);
            }
        }
    }

    let total = records.len();
    let mut stats: Vec<CompositionStat> = groups
        .into_iter()
        .enumerate()
        .map(|(idx, group)| CompositionStat {
            id: format!("{side}-{idx}"),
            composition_key: group.key,
            team_type: side,
            teams: group.teams,
            count: group.count,
            percentage: if total > 0 {
                group.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(limit);
    stats
}

/// Rank both sides and count the records.
pub fn aggregate_all(records: &[DraftResultRecord], limit: usize) -> AllStats {
    AllStats {
        baron: aggregate_compositions(records, Side::Baron, limit),
        elder: aggregate_compositions(records, Side::Elder, limit),
        total_count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Captain;
    use crate::catalog::TeamCode::*;

    fn record(baron: [TeamCode; 5], elder: [TeamCode; 5]) -> DraftResultRecord {
        DraftResultRecord {
            id: None,
            first_pick: Captain::Gen,
            baron_composition: composition_key(&baron),
            elder_composition: composition_key(&elder),
            baron_teams: baron.to_vec(),
            elder_teams: elder.to_vec(),
            created_at: None,
        }
    }

    const ELDER: [TeamCode; 5] = [Hle, Kt, Dk, Bro, Drx];

    #[test]
    fn key_ignores_acquisition_order() {
        assert_eq!(composition_key(&[Gen, T1, Kt, Dk, Bfx]), "BFX,DK,GEN,KT,T1");
        assert_eq!(
            composition_key(&[Gen, T1, Kt, Dk, Bfx]),
            composition_key(&[Gen, Bfx, Dk, T1, Kt])
        );
        assert_ne!(
            composition_key(&[Gen, T1, Kt, Dk, Bfx]),
            composition_key(&[Gen, T1, Kt, Dk, Ns])
        );
    }

    #[test]
    fn permutations_collapse_into_one_group() {
        let records = vec![
            record([Gen, T1, Kt, Dk, Bfx], ELDER),
            record([Gen, Bfx, Dk, T1, Kt], ELDER),
            record([Gen, Ns, Bro, Drx, Dnf], ELDER),
        ];
        let stats = aggregate_compositions(&records, Side::Baron, DEFAULT_RANKING_LIMIT);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].percentage_label(), "66.7");
        assert_eq!(stats[0].teams, vec![Gen, T1, Kt, Dk, Bfx]);
        assert_eq!(stats[0].composition_key, "BFX,DK,GEN,KT,T1");
        assert_eq!(stats[0].team_type, Side::Baron);
        assert_eq!(stats[1].count, 1);
        assert_eq!(stats[1].percentage_label(), "33.3");
        assert!((stats[0].percentage + stats[1].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let records = vec![
            record([Gen, Ns, Bro, Drx, Dnf], ELDER),
            record([Gen, T1, Kt, Dk, Bfx], ELDER),
            record([Gen, T1, Kt, Dk, Ns], ELDER),
            record([Gen, Kt, T1, Dk, Ns], ELDER),
        ];
        let stats = aggregate_compositions(&records, Side::Baron, DEFAULT_RANKING_LIMIT);
        let ids: Vec<&str> = stats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["baron-2", "baron-0", "baron-1"]);
    }

    #[test]
    fn elder_side_is_ranked_independently() {
        let records = vec![
            record([Gen, T1, Kt, Dk, Bfx], [Hle, Ns, Bro, Drx, Dnf]),
            record([Gen, Ns, Bro, Drx, Dnf], [Hle, Bfx, Dk, T1, Kt]),
        ];
        let stats = aggregate_all(&records, DEFAULT_RANKING_LIMIT);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.elder.len(), 2);
        assert_eq!(stats.elder[0].id, "elder-0");
        assert_eq!(stats.side(Side::Elder)[1].teams[0], Hle);
        assert!(stats.baron.iter().all(|s| s.percentage == 50.0));
    }

    #[test]
    fn ranking_is_truncated() {
        let pool = [T1, Kt, Dk, Bfx, Ns, Bro, Drx, Dnf];
        // 8 choose 4 = 70 distinct baron line-ups.
        let mut records = Vec::new();
        for a in 0..8 {
            for b in a + 1..8 {
                for c in b + 1..8 {
                    for d in c + 1..8 {
                        records.push(record([Gen, pool[a], pool[b], pool[c], pool[d]], ELDER));
                    }
                }
            }
        }
        assert_eq!(records.len(), 70);
        let stats = aggregate_compositions(&records, Side::Baron, DEFAULT_RANKING_LIMIT);
        assert_eq!(stats.len(), 20);
        assert_eq!(stats[0].id, "baron-0");
        assert_eq!(stats[19].id, "baron-19");

        assert_eq!(aggregate_compositions(&records, Side::Baron, 3).len(), 3);
    }

    #[test]
    fn empty_history_yields_empty_rankings() {
        let stats = aggregate_all(&[], DEFAULT_RANKING_LIMIT);
        assert_eq!(stats, AllStats::default());
        assert!(stats.baron.is_empty());
        assert!(stats.elder.is_empty());
        assert_eq!(stats.total_count, 0);
    }
}
