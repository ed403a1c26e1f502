use crate::problem::duration_matrix::DurationMatrix;

/// Optimal cyclic tour visiting every location once and returning to
/// `start`. The result has `len + 1` entries; first and last are `start`.
///
/// Exhaustive over subsets, so exponential in the matrix size; meant for
/// small location counts.
pub fn closed_tour(matrix: &DurationMatrix, start: usize) -> Vec<usize> {
    solve(matrix, start, None)
}

/// Optimal path visiting every location once, from `start` to `end`. The
/// result has exactly `len` entries.
pub fn open_tour(matrix: &DurationMatrix, start: usize, end: usize) -> Vec<usize> {
    solve(matrix, start, Some(end))
}

/// Total edge weight of `order` under `matrix`.
pub fn tour_cost(matrix: &DurationMatrix, order: &[usize]) -> f64 {
    order
        .windows(2)
        .map(|leg| matrix.duration(leg[0], leg[1]))
        .sum()
}

/// Held-Karp over "cost to finish from here": `rest[mask][i]` is the
/// cheapest way to visit everything outside `mask` and close the tour,
/// standing at `i` with `mask` already visited.
fn solve(matrix: &DurationMatrix, start: usize, end: Option<usize>) -> Vec<usize> {
    let n = matrix.len();

    assert!(n > 0, "empty duration matrix");
    assert!(start < n, "start index {start} out of range for {n} locations");
    if let Some(end) = end {
        assert!(end < n, "end index {end} out of range for {n} locations");
        assert!(n == 1 || end != start, "open tour start and end must differ");
    }

    let full = (1usize << n) - 1;
    let mut rest = vec![f64::INFINITY; (full + 1) * n];

    for mask in (0..=full).rev() {
        if mask & (1 << start) == 0 {
            continue;
        }

        for i in 0..n {
            if mask & (1 << i) == 0 {
                continue;
            }

            rest[mask * n + i] = if mask == full {
                match end {
                    Some(end) if i == end => 0.0,
                    Some(_) => f64::INFINITY,
                    None => matrix.duration(i, start),
                }
            } else {
                let mut best = f64::INFINITY;

                for j in 0..n {
                    if mask & (1 << j) != 0 {
                        continue;
                    }
                    // The end is only ever the last stop.
                    if end == Some(j) && mask | (1 << j) != full {
                        continue;
                    }

                    let candidate = matrix.duration(i, j) + rest[(mask | (1 << j)) * n + j];
                    if candidate < best {
                        best = candidate;
                    }
                }

                best
            };
        }
    }

    // Walk the table forward, always taking the smallest index that still
    // achieves the optimum. Ties therefore resolve to the lexicographically
    // smallest optimal order.
    let mut order = Vec::with_capacity(n + 1);
    let mut mask = 1usize << start;
    let mut current = start;
    order.push(start);

    while mask != full {
        let target = rest[mask * n + current];
        let mut chosen = None;

        for j in 0..n {
            if mask & (1 << j) != 0 {
                continue;
            }
            if end == Some(j) && mask | (1 << j) != full {
                continue;
            }

            if matrix.duration(current, j) + rest[(mask | (1 << j)) * n + j] == target {
                chosen = Some(j);
                break;
            }
        }

        let next = chosen.expect("some unvisited location achieves the optimum");
        order.push(next);
        mask |= 1 << next;
        current = next;
    }

    if end.is_none() {
        order.push(start);
    }

    order
}
