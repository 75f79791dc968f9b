use std::f64::consts::SQRT_2;

use derive_more::Display;
use thiserror::Error;

use crate::cost::Cost;
use crate::space::CostMap;
use crate::space::Position;

const MAX_ELEMENTS_DISPLAYED: usize = 80;
const RANDOM_STATE_MAX_TRIES: usize = 10_000;

/// Cost of entering a plain free cell.
pub const FREE_CELL_COST: f64 = 1.0;

// Simple colours
const WHITE: [u8; 3] = [u8::MAX, u8::MAX, u8::MAX];
const BLACK: [u8; 3] = [u8::MIN, u8::MIN, u8::MIN];
const GREEN: [u8; 3] = [u8::MIN, u8::MAX, u8::MIN];
const BLUE: [u8; 3] = [u8::MIN, u8::MIN, u8::MAX];

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum Grid2DCell {
    #[display(".")]
    Free,
    #[display("{_0}")]
    Cost(u8),
    #[display("#")]
    Obstacle,
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

impl Grid2DCell {
    fn cost(&self) -> f64 {
        match self {
            Grid2DCell::Free | Grid2DCell::Start | Grid2DCell::Goal => FREE_CELL_COST,
            Grid2DCell::Cost(c) => f64::from(*c),
            Grid2DCell::Obstacle => f64::INFINITY,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Grid2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Grid2DCell {
    type Error = Grid2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(Grid2DCell::Free),
            '#' | '█' => Ok(Grid2DCell::Obstacle),
            'S' => Ok(Grid2DCell::Start),
            'G' => Ok(Grid2DCell::Goal),
            '0'..='9' => Ok(Grid2DCell::Cost(ch as u8 - b'0')),
            ch => Err(Grid2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CostMapError {
    #[error("Invalid cost {cost} for cell {position}, costs must be non-negative")]
    InvalidCellCost { position: Position, cost: f64 },
    #[error("Cell {position} is outside the {width}x{height} map")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
    #[error("A {width}x{height} map needs {} cells, got {found}", .width * .height)]
    DimensionMismatch {
        width: usize,
        height: usize,
        found: usize,
    },
}

/// A grid of per-cell costs.
///
/// Infinite cells are obstacles. Moving between two cells costs the average
/// of both cells, times `√2` for diagonal moves, so a move never costs less
/// than its length times the cheapest cell.
#[derive(Clone, PartialEq)]
pub struct GridCostMap {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl GridCostMap {
    /// An obstacle-free map where every cell costs `FREE_CELL_COST`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![FREE_CELL_COST; width * height],
        }
    }

    /// A map from row-major cell costs.
    pub fn from_cells(width: usize, height: usize, cells: Vec<f64>) -> Result<Self, CostMapError> {
        if cells.len() != width * height {
            return Err(CostMapError::DimensionMismatch {
                width,
                height,
                found: cells.len(),
            });
        }
        for (i, &cost) in cells.iter().enumerate() {
            if !Self::valid_cell_cost(cost) {
                return Err(CostMapError::InvalidCellCost {
                    position: Position::new(i % width, i / width),
                    cost,
                });
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn valid_cell_cost(cost: f64) -> bool {
        !cost.is_nan() && cost >= 0.0
    }

    #[inline(always)]
    fn offset(&self, p: &Position) -> Option<usize> {
        (p.x < self.width && p.y < self.height).then_some(p.y * self.width + p.x)
    }

    fn checked_offset(&self, p: &Position) -> Result<usize, CostMapError> {
        self.offset(p).ok_or(CostMapError::OutOfBounds {
            position: *p,
            width: self.width,
            height: self.height,
        })
    }

    /// Cost of a cell, `None` outside the map.
    pub fn cell_cost(&self, p: &Position) -> Option<f64> {
        self.offset(p).map(|i| self.cells[i])
    }

    pub fn set_cell_cost(&mut self, p: &Position, cost: f64) -> Result<(), CostMapError> {
        let i = self.checked_offset(p)?;
        if !Self::valid_cell_cost(cost) {
            return Err(CostMapError::InvalidCellCost { position: *p, cost });
        }
        self.cells[i] = cost;
        Ok(())
    }

    pub fn add_obstacle(&mut self, p: &Position) -> Result<(), CostMapError> {
        self.set_cell_cost(p, f64::INFINITY)
    }

    /// Blocks a rectangle, clipped to the map.
    pub fn add_rectangle_obstacle(&mut self, top_left: &Position, width: usize, height: usize) {
        let x_end = top_left.x.saturating_add(width).min(self.width);
        let y_end = top_left.y.saturating_add(height).min(self.height);
        for y in top_left.y..y_end {
            for x in top_left.x..x_end {
                self.cells[y * self.width + x] = f64::INFINITY;
            }
        }
    }

    /// Whether a cell is blocked. Cells outside the map are.
    pub fn is_obstacle(&self, p: &Position) -> bool {
        self.cell_cost(p).is_none_or(|c| c.is_infinite())
    }

    /// A random cell that isn't an obstacle.
    pub fn random_free_position<R: rand::Rng>(&self, r: &mut R) -> Option<Position> {
        if self.cells.is_empty() {
            return None;
        }
        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let p = Position::new(r.random_range(0..self.width), r.random_range(0..self.height));
            if !self.is_obstacle(&p) {
                return Some(p);
            }
        }
        None
    }

    fn cell_char(&self, p: &Position) -> char {
        match self.cell_cost(p) {
            None => ' ',
            Some(c) if c.is_infinite() => '#',
            Some(c) if c == FREE_CELL_COST => '.',
            Some(c) if c.fract() == 0.0 && (0.0..=9.0).contains(&c) => {
                char::from(b'0' + c as u8)
            }
            Some(_) => '~',
        }
    }
}

impl CostMap for GridCostMap {
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn edge_cost(&self, from: &Position, to: &Position) -> Cost {
        debug_assert!(from.is_adjacent(to), "{from} -> {to} is not a single move");
        let (Some(a), Some(b)) = (self.cell_cost(from), self.cell_cost(to)) else {
            return Cost::infinity();
        };
        let step = if from.is_diagonal_to(to) { SQRT_2 } else { 1.0 };
        Cost::new(step * (a + b) / 2.0)
    }

    #[inline(always)]
    fn is_traversable(&self, p: &Position) -> bool {
        !self.is_obstacle(p)
    }

    /// The cheapest finite cell, `0` on maps without free cells.
    fn min_step_cost(&self) -> f64 {
        let cheapest = self
            .cells
            .iter()
            .copied()
            .filter(|c| c.is_finite())
            .fold(f64::INFINITY, f64::min);
        if cheapest.is_finite() { cheapest } else { 0.0 }
    }
}

impl std::fmt::Display for GridCostMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "GridCostMap({}x{}):", self.width, self.height)?;
        for y in (0..self.height).take(MAX_ELEMENTS_DISPLAYED) {
            for x in (0..self.width).take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{}", self.cell_char(&Position::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for GridCostMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "GridCostMap{:?}", (self.width, self.height))
    }
}

/// A map with a start and a goal.
#[derive(Clone, Debug)]
pub struct PlanningProblem {
    pub cost_map: GridCostMap,
    pub start: Position,
    pub goal: Position,
}

#[derive(Debug, Error)]
pub enum ProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Row {y} has {found} cells, expected {expected}")]
    RaggedRow {
        y: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: Grid2DCellParseError,
        x: usize,
        y: usize,
    },
    #[error("No start found")]
    MissingStart,
    #[error("No goal found")]
    MissingGoal,
    #[error("Found a second start at {second}, the first one is at {first}")]
    DuplicateStart { first: Position, second: Position },
    #[error("Found a second goal at {second}, the first one is at {first}")]
    DuplicateGoal { first: Position, second: Position },
    #[error("Invalid map: {0}")]
    CostMap(#[from] CostMapError),
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
    #[error("Image error when loading '{p}': {e}")]
    ImageError {
        p: std::path::PathBuf,
        e: image::ImageError,
    },
}

/// Collects start and goal markers while reading a map.
#[derive(Default)]
struct Markers {
    start: Option<Position>,
    goal: Option<Position>,
}

impl Markers {
    fn start(&mut self, p: Position) -> Result<(), ProblemParseError> {
        match self.start {
            Some(first) => Err(ProblemParseError::DuplicateStart { first, second: p }),
            None => {
                self.start = Some(p);
                Ok(())
            }
        }
    }
    fn goal(&mut self, p: Position) -> Result<(), ProblemParseError> {
        match self.goal {
            Some(first) => Err(ProblemParseError::DuplicateGoal { first, second: p }),
            None => {
                self.goal = Some(p);
                Ok(())
            }
        }
    }
    fn into_problem(self, cost_map: GridCostMap) -> Result<PlanningProblem, ProblemParseError> {
        Ok(PlanningProblem {
            cost_map,
            start: self.start.ok_or(ProblemParseError::MissingStart)?,
            goal: self.goal.ok_or(ProblemParseError::MissingGoal)?,
        })
    }
}

impl PlanningProblem {
    /// A random map with `num_obstacles` rectangular obstacles, and a free
    /// start and goal.
    ///
    /// Returns `None` if no free start and goal could be found.
    pub fn random<R: rand::Rng>(
        r: &mut R,
        width: usize,
        height: usize,
        num_obstacles: usize,
    ) -> Option<PlanningProblem> {
        if width == 0 || height == 0 {
            return None;
        }
        let mut cost_map = GridCostMap::new(width, height);
        let max_side = (width.min(height) / 4).max(1);
        for _ in 0..num_obstacles {
            let top_left = Position::new(r.random_range(0..width), r.random_range(0..height));
            let w = r.random_range(1..=max_side);
            let h = r.random_range(1..=max_side);
            cost_map.add_rectangle_obstacle(&top_left, w, h);
        }
        if cost_map.cells.iter().filter(|c| c.is_finite()).count() < 2 {
            return None;
        }

        let start = cost_map.random_free_position(r)?;
        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let goal = cost_map.random_free_position(r)?;
            if goal != start {
                return Some(PlanningProblem {
                    cost_map,
                    start,
                    goal,
                });
            }
        }
        None
    }

    /// Draws the map with `path` on it.
    ///
    /// ```
    /// use gridplan::problems::grid_2d::PlanningProblem;
    /// use gridplan::space::Position;
    ///
    /// let problem = PlanningProblem::try_from("S.#\n..G").unwrap();
    /// let path = [Position::new(0, 0), Position::new(1, 1), Position::new(2, 1)];
    /// assert_eq!(problem.render(&path), "S.#\n.*G\n");
    /// ```
    pub fn render(&self, path: &[Position]) -> String {
        let (width, height) = self.cost_map.dimensions();
        let mut out = String::with_capacity((width + 1) * height);
        for y in 0..height {
            for x in 0..width {
                let p = Position::new(x, y);
                let ch = if p == self.start {
                    'S'
                } else if p == self.goal {
                    'G'
                } else if path.contains(&p) {
                    '*'
                } else {
                    self.cost_map.cell_char(&p)
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl std::convert::TryFrom<&str> for PlanningProblem {
    type Error = ProblemParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().skip_while(|l| l.is_empty()).collect();
        if lines.is_empty() {
            return Err(ProblemParseError::EmptyInput);
        }

        let width = lines[0].chars().count();
        let height = lines.len();
        let mut cells = Vec::with_capacity(width * height);
        let mut markers = Markers::default();

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ProblemParseError::RaggedRow {
                    y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let cell = Grid2DCell::try_from(ch)
                    .map_err(|e| ProblemParseError::InvalidCell { e, x, y })?;
                match cell {
                    Grid2DCell::Start => markers.start(Position::new(x, y))?,
                    Grid2DCell::Goal => markers.goal(Position::new(x, y))?,
                    _ => {}
                }
                cells.push(cell.cost());
            }
        }

        let cost_map = GridCostMap::from_cells(width, height, cells)?;
        markers.into_problem(cost_map)
    }
}

impl std::convert::TryFrom<&std::path::Path> for PlanningProblem {
    type Error = ProblemParseError;

    /// Loads a PNG map: black cells are obstacles, blue is the start and green
    /// the goal. Anything else is free.
    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        use image::ImageReader;
        use image::Rgb;

        let img = ImageReader::open(p)
            .map_err(|e| ProblemParseError::IOError {
                p: p.to_path_buf(),
                e,
            })?
            .decode()
            .map_err(|e| ProblemParseError::ImageError {
                p: p.to_path_buf(),
                e,
            })?
            .into_rgb8();

        let width = img.width() as usize;
        let height = img.height() as usize;
        if width == 0 || height == 0 {
            return Err(ProblemParseError::EmptyInput);
        }

        let mut cost_map = GridCostMap::new(width, height);
        let mut markers = Markers::default();

        for (x, y, px) in img.enumerate_pixels() {
            let px: &Rgb<u8> = px;
            let pos = Position::new(x as usize, y as usize);
            match px.0 {
                BLACK => cost_map.add_obstacle(&pos)?,
                WHITE => {}
                GREEN => markers.goal(pos)?,
                BLUE => markers.start(pos)?,
                _ => {}
            }
        }

        markers.into_problem(cost_map)
    }
}

impl std::fmt::Display for PlanningProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (width, height) = self.cost_map.dimensions();
        writeln!(
            f,
            "PlanningProblem({width}x{height}) (s:{}, g:{}):",
            self.start, self.goal
        )?;
        write!(f, "{}", self.render(&[]))
    }
}
