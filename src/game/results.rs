use serde::Deserialize;
use serde::Serialize;

/// One seat's outcome. Ranks are 1-based; tied scores share a rank under
/// a stable seat-order tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub player_index: usize,
    pub score: f64,
    pub rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResults {
    pub players: Vec<PlayerResult>,
    pub winner: Option<usize>,
    pub is_draw: bool,
}

impl MatchResults {
    /// Rank scores descending with standard competition ranking: tied
    /// scores share a rank, the next distinct score skips past them.
    /// `winner` is the unique top seat, or `None` on a tied top.
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let stats = vec![None; scores.len()];
        Self::from_scores_with_stats(scores, stats)
    }

    pub fn from_scores_with_stats(
        scores: Vec<f64>,
        stats: Vec<Option<serde_json::Value>>,
    ) -> Self {
        let mut order = (0..scores.len()).collect::<Vec<usize>>();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        let mut ranks = vec![0usize; scores.len()];
        for (position, &player) in order.iter().enumerate() {
            ranks[player] = match position {
                0 => 1,
                _ => {
                    let ahead = order[position - 1];
                    if scores[player] == scores[ahead] {
                        ranks[ahead]
                    } else {
                        position + 1
                    }
                }
            };
        }
        let top = order.first().copied();
        let is_draw = match (order.first(), order.get(1)) {
            (Some(&a), Some(&b)) => scores[a] == scores[b],
            _ => false,
        };
        let mut stats = stats;
        let players = scores
            .iter()
            .enumerate()
            .map(|(player_index, &score)| PlayerResult {
                player_index,
                score,
                rank: ranks[player_index],
                stats: stats.get_mut(player_index).and_then(Option::take),
            })
            .collect();
        Self {
            players,
            winner: if is_draw { None } else { top },
            is_draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_top_wins() {
        let results = MatchResults::from_scores(vec![1010.0, 990.0]);
        assert_eq!(results.winner, Some(0));
        assert!(!results.is_draw);
        assert_eq!(results.players[0].rank, 1);
        assert_eq!(results.players[1].rank, 2);
    }

    #[test]
    fn tied_top_is_a_draw() {
        let results = MatchResults::from_scores(vec![0.5, 0.5]);
        assert_eq!(results.winner, None);
        assert!(results.is_draw);
        assert_eq!(results.players[0].rank, 1);
        assert_eq!(results.players[1].rank, 1);
    }

    #[test]
    fn competition_ranking_skips_past_ties() {
        let results = MatchResults::from_scores(vec![50.0, 100.0, 100.0, 10.0]);
        let ranks = results
            .players
            .iter()
            .map(|p| p.rank)
            .collect::<Vec<usize>>();
        assert_eq!(ranks, vec![3, 1, 1, 4]);
        assert_eq!(results.winner, None);
        assert!(results.is_draw);
    }

    #[test]
    fn player_indices_cover_the_table() {
        let results = MatchResults::from_scores(vec![3.0, 1.0, 2.0]);
        let indices = results
            .players
            .iter()
            .map(|p| p.player_index)
            .collect::<Vec<usize>>();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(results.winner, Some(0));
    }

    #[test]
    fn winner_serializes_as_null_on_draw() {
        let results = MatchResults::from_scores(vec![1.0, 1.0]);
        let json = serde_json::to_value(&results).unwrap();
        assert!(json.get("winner").unwrap().is_null());
        assert_eq!(json.get("isDraw").unwrap(), &serde_json::json!(true));
    }
}
