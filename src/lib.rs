//! Python bindings for the dynamic maze.
//!
//! Build with `maturin develop --features python`; the module exposes a
//! gym-shaped `DynamicMaze` class that an external trainer can drive.

pub use dynamaze;

#[cfg(feature = "python")]
mod python {
    use dynamaze::maze::{GridPosition, MazeConfig, MazeEnvironment};
    use dynamaze::Env;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    type Cell = (usize, usize);

    fn to_py_err(err: impl std::fmt::Display) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn cells(positions: Vec<GridPosition>) -> Vec<Cell> {
        positions.into_iter().map(|p| (p.row, p.col)).collect()
    }

    /// The maze environment, with `reset`/`step` returning gym-style tuples.
    #[pyclass(name = "DynamicMaze")]
    struct DynamicMaze {
        inner: MazeEnvironment,
    }

    #[pymethods]
    impl DynamicMaze {
        /// Takes an optional JSON config; missing fields use the defaults.
        #[new]
        #[pyo3(signature = (config_json = None))]
        fn new(config_json: Option<&str>) -> PyResult<Self> {
            let config = match config_json {
                Some(json) => MazeConfig::from_json_str(json).map_err(to_py_err)?,
                None => MazeConfig::default(),
            };
            let inner = MazeEnvironment::new(config).map_err(to_py_err)?;
            Ok(Self { inner })
        }

        #[pyo3(signature = (seed = None, options = None))]
        #[allow(unused_variables)]
        fn reset<'py>(
            &mut self,
            py: Python<'py>,
            seed: Option<u64>,
            options: Option<Bound<'py, PyAny>>,
        ) -> PyResult<((i32, i32), Bound<'py, PyDict>)> {
            let [row, col] = self.inner.reset(seed);
            Ok(((row, col), PyDict::new(py)))
        }

        #[allow(clippy::type_complexity)]
        fn step<'py>(
            &mut self,
            py: Python<'py>,
            action: i64,
        ) -> PyResult<((i32, i32), f32, bool, bool, Bound<'py, PyDict>)> {
            let t = Env::step(&mut self.inner, action).map_err(to_py_err)?;
            let info = PyDict::new(py);
            info.set_item("step_count", t.info.step_count)?;
            info.set_item("event", t.info.event.as_str())?;
            let [row, col] = t.obs;
            Ok(((row, col), t.reward, t.terminated, t.truncated, info))
        }

        fn close(&mut self) -> PyResult<()> {
            Env::close(&mut self.inner).map_err(to_py_err)
        }

        #[getter]
        fn agent_pos(&self) -> Cell {
            let p = self.inner.agent_pos();
            (p.row, p.col)
        }

        #[getter]
        fn step_count(&self) -> u32 {
            self.inner.step_count()
        }

        #[getter]
        fn grid_size(&self) -> Cell {
            let cfg = self.inner.config();
            (cfg.grid_rows, cfg.grid_cols)
        }

        #[getter]
        fn start_pos(&self) -> Cell {
            let p = self.inner.start();
            (p.row, p.col)
        }

        #[getter]
        fn goal_pos(&self) -> Cell {
            let p = self.inner.goal();
            (p.row, p.col)
        }

        #[getter]
        fn bombs(&self) -> Vec<Cell> {
            cells(self.inner.layout().bomb_cells())
        }

        #[getter]
        fn pits(&self) -> Vec<Cell> {
            cells(self.inner.layout().pit_cells())
        }

        #[getter]
        fn rewards(&self) -> Vec<Cell> {
            cells(self.inner.layout().bonus_cells())
        }

        /// `(low, high)` for both observation components.
        #[getter]
        fn observation_bounds(&self) -> (i32, i32) {
            self.inner.observation_bounds()
        }

        #[getter]
        fn num_actions(&self) -> usize {
            self.inner.num_actions()
        }
    }

    /// A Python module implemented in Rust.
    /// The name of this function must match the lib.name in Cargo.toml
    #[pymodule]
    fn dynamaze_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<DynamicMaze>()?;
        Ok(())
    }
}
