// Share-link codec for completed drafts.
//
// Token format: `{first}-{baron picks}-{elder picks}`, e.g.
// `GEN-T1,BFX,NS,DNF-KT,DK,BRO,DRX`. Captains are implied by the catalog and
// omitted; each picks segment lists that side's four picks in pick order.

use tracing::debug;
use url::Url;

use crate::catalog::{Captain, Side, TeamCode, SIDE_SIZE};
use crate::draft::{schedule, DraftResult, DraftState};

const SEGMENT_DELIMITER: char = '-';
const PICK_DELIMITER: char = ',';
const PICKS_PER_SIDE: usize = SIDE_SIZE - 1;

/// Query parameter that carries the token in a share URL.
const SHARE_QUERY_KEY: &str = "data";

/// Encode a completed draft as a share token.
pub fn serialize_result(result: &DraftResult) -> String {
    let side_segment = |side: Side| {
        result
            .side_picks(side)
            .iter()
            .map(|t| t.code())
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        "{}{SEGMENT_DELIMITER}{}{SEGMENT_DELIMITER}{}",
        result.first_pick,
        side_segment(Side::Baron),
        side_segment(Side::Elder)
    )
}

/// Decode a share token back into the draft result it was produced from.
///
/// Returns `None` for anything that is not the encoding of a complete, legal
/// draft: wrong segment or pick counts, an unknown first picker, unknown team
/// codes, captains among the picks, or a team picked twice. Per-pick
/// attribution is rebuilt by replaying the picks in schedule order.
pub fn deserialize_result(token: &str) -> Option<DraftResult> {
    let segments: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();
    let [first, baron, elder] = segments.as_slice() else {
        debug!(token, "share token rejected: segment count");
        return None;
    };

    let first_pick = Captain::from_code(first)?;
    let mut baron_picks = parse_picks(baron)?.into_iter();
    let mut elder_picks = parse_picks(elder)?.into_iter();

    let ordered = schedule(first_pick)
        .into_iter()
        .map(|captain| match captain.side() {
            Side::Baron => baron_picks.next(),
            Side::Elder => elder_picks.next(),
        })
        .collect::<Option<Vec<TeamCode>>>()?;

    match DraftState::replay(first_pick, ordered).and_then(|s| s.to_result()) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(token, error = %e, "share token rejected");
            None
        }
    }
}

/// Split one picks segment into exactly four known team codes.
fn parse_picks(segment: &str) -> Option<Vec<TeamCode>> {
    let picks = segment
        .split(PICK_DELIMITER)
        .map(TeamCode::from_code)
        .collect::<Option<Vec<_>>>()?;
    (picks.len() == PICKS_PER_SIDE).then_some(picks)
}

/// Build the link that opens the shared result page for `result`.
pub fn share_url(base_url: &str, result: &DraftResult) -> String {
    format!(
        "{}/result?{SHARE_QUERY_KEY}={}",
        base_url.trim_end_matches('/'),
        serialize_result(result)
    )
}

/// Pull the token out of a share URL, percent-decoding it. Input that is not
/// an absolute URL is taken to be a bare token already.
pub fn token_from_share_url(input: &str) -> Option<String> {
    let input = input.trim();
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => return Some(input.to_string()),
    };
    let token = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_KEY)
        .map(|(_, value)| value.into_owned());
    if token.is_none() {
        debug!(url = %url, "share url has no {SHARE_QUERY_KEY} parameter");
    }
    token
}
