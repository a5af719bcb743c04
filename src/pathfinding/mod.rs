use crate::game_logic::errors::PathfindError;
use bevy::prelude::*;
use pathfinding::prelude::astar;

/// A single cell in the navigation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: u32,
    pub z: u32,
}

impl GridCell {
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Get neighbors of this grid cell (4-directional)
    pub fn neighbors(&self, grid_width: u32, grid_height: u32) -> Vec<GridCell> {
        let mut neighbors = Vec::new();

        // North
        if self.z > 0 {
            neighbors.push(GridCell::new(self.x, self.z - 1));
        }

        // South
        if self.z < grid_height - 1 {
            neighbors.push(GridCell::new(self.x, self.z + 1));
        }

        // West
        if self.x > 0 {
            neighbors.push(GridCell::new(self.x - 1, self.z));
        }

        // East
        if self.x < grid_width - 1 {
            neighbors.push(GridCell::new(self.x + 1, self.z));
        }

        neighbors
    }

    /// Calculate Euclidean distance to another cell (heuristic for A*)
    pub fn euclidean_distance(&self, other: &GridCell) -> f32 {
        let dx = (self.x as f32 - other.x as f32).abs();
        let dz = (self.z as f32 - other.z as f32).abs();
        (dx * dx + dz * dz).sqrt()
    }
}

/// Navigation grid for pathfinding.
///
/// A centered, uniform grid on the ground plane. Cells are either walkable
/// or blocked; the battlefield itself is flat (the locomotion layer keeps
/// every unit at Y = 0 anyway).
#[derive(Debug, Clone, Resource)]
pub struct NavGrid {
    /// Walkability map - true if the cell is walkable
    walkable: Vec<bool>,
    /// Grid dimensions
    pub width: u32,
    pub height: u32,
    /// World scale per grid cell
    pub cell_size: f32,
}

impl NavGrid {
    /// Create a fully walkable grid centered on the world origin
    pub fn flat(width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            walkable: vec![true; (width * height) as usize],
            width,
            height,
            cell_size,
        }
    }

    pub fn is_walkable(&self, x: u32, z: u32) -> bool {
        if x >= self.width || z >= self.height {
            return false;
        }
        self.walkable[(z * self.width + x) as usize]
    }

    pub fn set_walkable(&mut self, x: u32, z: u32, walkable: bool) {
        if x >= self.width || z >= self.height {
            return;
        }
        self.walkable[(z * self.width + x) as usize] = walkable;
    }

    /// Block every cell whose center lies inside the world-space rectangle
    pub fn block_rect(&mut self, min: Vec3, max: Vec3) {
        for z in 0..self.height {
            for x in 0..self.width {
                let center = self.grid_to_world(GridCell::new(x, z));
                if center.x >= min.x && center.x <= max.x && center.z >= min.z && center.z <= max.z
                {
                    self.set_walkable(x, z, false);
                }
            }
        }
    }

    /// Convert world position to grid coordinates, returning None if out of bounds
    pub fn world_to_grid(&self, world_pos: Vec3) -> Option<GridCell> {
        let half_width = (self.width as f32 * self.cell_size) / 2.0;
        let half_height = (self.height as f32 * self.cell_size) / 2.0;

        let x = ((world_pos.x + half_width) / self.cell_size).round();
        let z = ((world_pos.z + half_height) / self.cell_size).round();

        if x >= 0.0 && z >= 0.0 && x < self.width as f32 && z < self.height as f32 {
            Some(GridCell::new(x as u32, z as u32))
        } else {
            None
        }
    }

    /// Convert grid coordinates to the cell's world-space center on the ground plane
    pub fn grid_to_world(&self, cell: GridCell) -> Vec3 {
        let half_width = (self.width as f32 * self.cell_size) / 2.0;
        let half_height = (self.height as f32 * self.cell_size) / 2.0;

        Vec3::new(
            cell.x as f32 * self.cell_size - half_width,
            0.0,
            cell.z as f32 * self.cell_size - half_height,
        )
    }
}

/// Filter waypoints to improve spacing while preserving path accuracy.
/// Greedy: keep waypoints at least min_distance apart, but always keep the
/// final waypoint so the unit reaches the destination.
fn filter_waypoints_for_spacing(waypoints: Vec<Vec3>, min_distance: f32) -> Vec<Vec3> {
    if waypoints.len() <= 2 {
        return waypoints;
    }

    let mut filtered = Vec::new();
    filtered.push(waypoints[0]);

    let mut last_kept_index = 0;

    for i in 1..waypoints.len() - 1 {
        let distance_from_last = waypoints[i].distance(waypoints[last_kept_index]);

        if distance_from_last >= min_distance {
            filtered.push(waypoints[i]);
            last_kept_index = i;
        }
    }

    if let Some(last) = waypoints.last() {
        if filtered.last() != Some(last) {
            filtered.push(*last);
        }
    }

    filtered
}

/// Find a path between two world positions using A* over the navigation grid.
///
/// Returns the corner list the locomotion layer enqueues as waypoints. The
/// start cell is omitted and the final corner is the exact requested goal
/// (ground-plane normalized), so the last queued waypoint equals the ordered
/// destination.
pub fn find_path(grid: &NavGrid, start: Vec3, goal: Vec3) -> Result<Vec<Vec3>, PathfindError> {
    let start_cell = grid
        .world_to_grid(start)
        .ok_or(PathfindError::OutOfBounds { position: start })?;
    let goal_cell = grid
        .world_to_grid(goal)
        .ok_or(PathfindError::OutOfBounds { position: goal })?;

    if !grid.is_walkable(start_cell.x, start_cell.z) {
        return Err(PathfindError::Blocked { position: start });
    }
    if !grid.is_walkable(goal_cell.x, goal_cell.z) {
        return Err(PathfindError::Blocked { position: goal });
    }

    let (path, _cost) = astar(
        &start_cell,
        |cell| {
            cell.neighbors(grid.width, grid.height)
                .into_iter()
                .filter(|n| grid.is_walkable(n.x, n.z))
                .map(|n| (n, 10u32))
                .collect::<Vec<_>>()
        },
        |cell| (cell.euclidean_distance(&goal_cell) * 10.0) as u32,
        |cell| *cell == goal_cell,
    )
    .ok_or(PathfindError::NoRoute)?;

    debug!(
        "Pathfinding success: {} cells from ({:.1},{:.1}) to ({:.1},{:.1})",
        path.len(),
        start.x,
        start.z,
        goal.x,
        goal.z
    );

    // Convert to world corners, dropping the start cell
    let mut corners: Vec<Vec3> = path
        .into_iter()
        .skip(1)
        .map(|cell| grid.grid_to_world(cell))
        .collect();

    let goal_ground = Vec3::new(goal.x, 0.0, goal.z);
    if corners.is_empty() {
        // Start and goal share a cell; move straight to the goal
        corners.push(goal_ground);
        return Ok(corners);
    }

    let mut corners = filter_waypoints_for_spacing(corners, 2.0 * grid.cell_size);

    // The final corner is the requested goal, not its cell center
    if let Some(last) = corners.last_mut() {
        *last = goal_ground;
    }

    Ok(corners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_grid_round_trip() {
        let grid = NavGrid::flat(32, 32, 1.0);
        let cell = grid.world_to_grid(Vec3::new(3.0, 0.0, -5.0)).unwrap();
        let world = grid.grid_to_world(cell);
        assert!((world.x - 3.0).abs() < 0.51);
        assert!((world.z - -5.0).abs() < 0.51);
        assert_eq!(world.y, 0.0);
    }

    #[test]
    fn test_out_of_bounds_positions_rejected() {
        let grid = NavGrid::flat(16, 16, 1.0);
        assert!(grid.world_to_grid(Vec3::new(100.0, 0.0, 0.0)).is_none());

        let result = find_path(&grid, Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);
        assert!(matches!(result, Err(PathfindError::OutOfBounds { .. })));
    }

    #[test]
    fn test_straight_path_on_open_ground() {
        let grid = NavGrid::flat(64, 64, 1.0);
        let start = Vec3::ZERO;
        let goal = Vec3::new(10.0, 0.0, 0.0);

        let corners = find_path(&grid, start, goal).unwrap();
        assert!(!corners.is_empty());
        // Last corner is the exact goal on the ground plane
        assert_eq!(*corners.last().unwrap(), goal);
        // All corners lie on the ground plane
        for corner in &corners {
            assert_eq!(corner.y, 0.0);
        }
    }

    #[test]
    fn test_path_routes_around_wall() {
        let mut grid = NavGrid::flat(32, 32, 1.0);
        // Wall across the direct route with a hole far to one side
        grid.block_rect(Vec3::new(4.5, 0.0, -16.0), Vec3::new(5.5, 0.0, 10.0));

        let start = Vec3::ZERO;
        let goal = Vec3::new(10.0, 0.0, 0.0);
        let corners = find_path(&grid, start, goal).unwrap();

        assert_eq!(*corners.last().unwrap(), goal);
        // The detour must leave the straight line between start and goal
        let detours = corners.iter().any(|c| c.z > 10.0);
        assert!(detours, "expected path to route around the wall: {corners:?}");
    }

    #[test]
    fn test_enclosed_goal_yields_no_route() {
        let mut grid = NavGrid::flat(32, 32, 1.0);
        // Box the goal in completely (goal cell itself stays walkable)
        grid.block_rect(Vec3::new(7.5, 0.0, -2.5), Vec3::new(12.5, 0.0, -1.5));
        grid.block_rect(Vec3::new(7.5, 0.0, 1.5), Vec3::new(12.5, 0.0, 2.5));
        grid.block_rect(Vec3::new(7.5, 0.0, -2.5), Vec3::new(8.5, 0.0, 2.5));
        grid.block_rect(Vec3::new(11.5, 0.0, -2.5), Vec3::new(12.5, 0.0, 2.5));

        let result = find_path(&grid, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(result.unwrap_err(), PathfindError::NoRoute);
    }

    #[test]
    fn test_blocked_goal_reports_blocked() {
        let mut grid = NavGrid::flat(32, 32, 1.0);
        let goal = Vec3::new(10.0, 0.0, 0.0);
        let cell = grid.world_to_grid(goal).unwrap();
        grid.set_walkable(cell.x, cell.z, false);

        let result = find_path(&grid, Vec3::ZERO, goal);
        assert!(matches!(result, Err(PathfindError::Blocked { .. })));
    }

    #[test]
    fn test_same_cell_start_and_goal() {
        let grid = NavGrid::flat(32, 32, 1.0);
        let goal = Vec3::new(0.2, 0.0, 0.1);
        let corners = find_path(&grid, Vec3::ZERO, goal).unwrap();
        assert_eq!(corners, vec![Vec3::new(0.2, 0.0, 0.1)]);
    }

    #[test]
    fn test_waypoint_spacing_filter() {
        let dense: Vec<Vec3> = (0..10).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let filtered = filter_waypoints_for_spacing(dense.clone(), 3.0);

        assert_eq!(filtered.first(), dense.first());
        assert_eq!(filtered.last(), dense.last());
        assert!(filtered.len() < dense.len());
    }
}
