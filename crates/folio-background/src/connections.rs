//! Proximity lines between particles.

/// A line between two points closer than the connection threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first point.
    pub from: usize,
    /// Index of the second point, always greater than `from`.
    pub to: usize,
    pub opacity: f64,
}

/// Opacity of a connection at `distance`, or `None` when the points are not
/// strictly closer than `threshold`.
pub fn connection_opacity(distance: f64, threshold: f64, factor: f64) -> Option<f64> {
    (distance < threshold).then(|| (threshold - distance) / threshold * factor)
}

/// All pairs of `points` closer than `threshold`.
///
/// Checks every pair once, which is fine for the few hundred points the
/// backdrop keeps alive.
pub fn find_connections(points: &[(f64, f64)], threshold: f64, factor: f64) -> Vec<Connection> {
    let mut connections = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for (j, b) in points.iter().enumerate().skip(i + 1) {
            let distance = (a.0 - b.0).hypot(a.1 - b.1);
            if let Some(opacity) = connection_opacity(distance, threshold, factor) {
                connections.push(Connection {
                    from: i,
                    to: j,
                    opacity,
                });
            }
        }
    }
    connections
}
