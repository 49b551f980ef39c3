//! Terminal scatter plot: grid configuration, Cartesian/canvas
//! coordinate transforms, and heatmap rendering of the weight field.
use primitive_perceptron::{LinearFunctionParams, Perceptron, Point};

/// Plot window and rendering configuration.
pub struct GridConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub grid_step: f64,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Cap on heatmap shading intensity, in [0, 1].
    pub saturation_cap: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_min: -20.0,
            x_max: 20.0,
            y_min: -20.0,
            y_max: 20.0,
            grid_step: 1.0,
            plot_width: 41,
            plot_height: 41,
            saturation_cap: 0.75,
        }
    }
}

impl GridConfig {
    /// Cartesian x to canvas column.
    pub fn to_canvas_x(&self, cartesian_x: f64) -> f64 {
        let cartesian_width = self.x_max - self.x_min;
        (self.plot_width as f64 / cartesian_width) * (cartesian_x - self.x_min)
    }

    /// Cartesian y to canvas row (canvas y grows downward).
    pub fn to_canvas_y(&self, cartesian_y: f64) -> f64 {
        let cartesian_height = self.y_max - self.y_min;
        (self.plot_height as f64 / cartesian_height) * (self.y_max - cartesian_y)
    }

    pub fn to_canvas(&self, point: Point) -> (f64, f64) {
        (self.to_canvas_x(point.x), self.to_canvas_y(point.y))
    }

    /// Canvas column back to cartesian x.
    pub fn to_cartesian_x(&self, canvas_x: f64) -> f64 {
        self.x_min + canvas_x * (self.x_max - self.x_min) / self.plot_width as f64
    }

    /// Canvas row back to cartesian y.
    pub fn to_cartesian_y(&self, canvas_y: f64) -> f64 {
        self.y_max - canvas_y * (self.y_max - self.y_min) / self.plot_height as f64
    }

    /// Canvas x coordinates of the vertical grid lines, walking outward
    /// from the y axis in `grid_step` increments.
    pub fn vertical_grid_line_xs(&self) -> Vec<f64> {
        let mut cartesian_coords = Vec::new();

        // Right hand side of y axis
        let mut x = self.grid_step;
        while x < self.x_max {
            cartesian_coords.push(x);
            x += self.grid_step;
        }

        // Left hand side of y axis
        let mut x = -self.grid_step;
        while x > self.x_min {
            cartesian_coords.push(x);
            x -= self.grid_step;
        }

        cartesian_coords
            .into_iter()
            .map(|coord| self.to_canvas_x(coord))
            .collect()
    }

    /// Canvas y coordinates of the horizontal grid lines.
    pub fn horizontal_grid_line_ys(&self) -> Vec<f64> {
        let mut cartesian_coords = Vec::new();

        // Above x axis
        let mut y = self.grid_step;
        while y < self.y_max {
            cartesian_coords.push(y);
            y += self.grid_step;
        }

        // Below x axis
        let mut y = -self.grid_step;
        while y > self.y_min {
            cartesian_coords.push(y);
            y -= self.grid_step;
        }

        cartesian_coords
            .into_iter()
            .map(|coord| self.to_canvas_y(coord))
            .collect()
    }

    /// Background color for a cell: channels interpolated linearly from
    /// a neutral white toward the class extreme (red for the silent
    /// side, blue for the firing side), clamped at the saturation cap.
    pub fn heat_rgb(&self, weighted_sum: f64, scale: f64) -> (u8, u8, u8) {
        let t = if scale > 0.0 {
            (weighted_sum.abs() / scale).min(self.saturation_cap)
        } else {
            0.0
        };
        let faded = (255.0 * (1.0 - t)).round() as u8;
        if weighted_sum > 0.0 {
            (faded, faded, 255)
        } else if weighted_sum < 0.0 {
            (255, faded, faded)
        } else {
            (255, 255, 255)
        }
    }
}

/// Render the plot as text: axes, grid marks, class points (`a`/`b`),
/// and the boundary line (`*`) when its parameters are finite.
///
/// With `heatmap` set, each cell is shaded by the sign and magnitude of
/// the model's weighted sum at that cell via ANSI background colors.
pub fn render_scatter_plot(
    config: &GridConfig,
    class_a_points: &[Point],
    class_b_points: &[Point],
    function_params: Option<LinearFunctionParams>,
    heatmap: Option<&Perceptron>,
) -> String {
    let boundary = function_params.filter(|params| params.m.is_finite() && params.n.is_finite());
    let cell_width = (config.x_max - config.x_min) / config.plot_width as f64;
    let cell_height = (config.y_max - config.y_min) / config.plot_height as f64;
    let heat_scale = heatmap.map(|model| {
        let corners = [
            Point::new(config.x_min, config.y_min),
            Point::new(config.x_min, config.y_max),
            Point::new(config.x_max, config.y_min),
            Point::new(config.x_max, config.y_max),
        ];
        corners
            .iter()
            .map(|&corner| model.weighted_sum(corner).abs())
            .fold(0.0, f64::max)
    });

    let a_cells: Vec<(isize, isize)> = class_a_points.iter().map(|&p| point_cell(config, p)).collect();
    let b_cells: Vec<(isize, isize)> = class_b_points.iter().map(|&p| point_cell(config, p)).collect();

    let mut out = String::new();
    for row in 0..config.plot_height {
        for col in 0..config.plot_width {
            let x = config.to_cartesian_x(col as f64 + 0.5);
            let y = config.to_cartesian_y(row as f64 + 0.5);
            let cell = (col as isize, row as isize);

            let ch = if a_cells.contains(&cell) {
                'a'
            } else if b_cells.contains(&cell) {
                'b'
            } else if boundary
                .map(|params| (params.m * x + params.n - y).abs() <= cell_height / 2.0)
                .unwrap_or(false)
            {
                '*'
            } else if x.abs() <= cell_width / 2.0 && y.abs() <= cell_height / 2.0 {
                '+'
            } else if x.abs() <= cell_width / 2.0 {
                '|'
            } else if y.abs() <= cell_height / 2.0 {
                '-'
            } else if on_grid_mark(x, config.grid_step * 5.0, cell_width / 2.0)
                || on_grid_mark(y, config.grid_step * 5.0, cell_height / 2.0)
            {
                '·'
            } else {
                ' '
            };

            match (heatmap, heat_scale) {
                (Some(model), Some(scale)) => {
                    let s = model.weighted_sum(Point::new(x, y));
                    let (r, g, b) = config.heat_rgb(s, scale);
                    out.push_str(&format!("\x1b[48;2;{};{};{}m{}\x1b[0m", r, g, b, ch));
                }
                _ => out.push(ch),
            }
        }
        out.push('\n');
    }
    out
}

fn point_cell(config: &GridConfig, point: Point) -> (isize, isize) {
    let (canvas_x, canvas_y) = config.to_canvas(point);
    (canvas_x.floor() as isize, canvas_y.floor() as isize)
}

// every 5th grid line is marked to keep the character plot legible
fn on_grid_mark(coord: f64, interval: f64, half_cell: f64) -> bool {
    let nearest = (coord / interval).round() * interval;
    nearest != 0.0 && (coord - nearest).abs() <= half_cell
}
