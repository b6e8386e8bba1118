//! Shortest-queue lane selection.

/// Index of the shortest wait queue, ties going to the lowest index.
///
/// Scans from index 0 and only moves to a later lane when its queue is
/// *strictly* shorter than the best seen so far.  Time remaining on the
/// passenger currently being served is ignored.  Returns `None` when
/// `lengths` is empty.
///
/// ```
/// use ap_queue::shortest_queue;
///
/// assert_eq!(shortest_queue([3, 1, 1, 2]), Some(1));
/// assert_eq!(shortest_queue(Vec::<usize>::new()), None);
/// ```
pub fn shortest_queue<I>(lengths: I) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<(usize, usize)> = None;
    for (i, len) in lengths.into_iter().enumerate() {
        match best {
            Some((_, best_len)) if len >= best_len => {}
            _ => best = Some((i, len)),
        }
    }
    best.map(|(i, _)| i)
}
