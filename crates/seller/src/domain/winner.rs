use super::BidResponse;

/// Picks the highest positive bid. Ties are won by the response that comes
/// first, so callers control the tie-break through the order of the input.
pub fn select<'a>(responses: impl IntoIterator<Item = &'a BidResponse>) -> Option<&'a BidResponse> {
    responses
        .into_iter()
        .filter(|response| response.is_bid())
        .reduce(|best, response| {
            if response.amount > best.amount {
                response
            } else {
                best
            }
        })
}
