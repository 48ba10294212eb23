use common::Point;

fn cross(o: Point, a: Point, b: Point) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of `points` in counter clockwise order, starting at the
/// left-most (then lowest) point. Collinear points on the outline are dropped.
pub fn convex_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.retain(|p| p.x.is_finite() && p.y.is_finite());
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();

    if points.len() < 3 {
        return points;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(points.len() * 2);

    // Lower half
    for p in points.iter().copied() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper half
    let lower_len = hull.len() + 1;
    for p in points.iter().rev().skip(1).copied() {
        while hull.len() >= lower_len
            && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // The last point is the starting point again
    hull.pop();
    hull
}
