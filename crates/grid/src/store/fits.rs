use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use fitsio::{FitsFile, hdu::HduInfo};
use ndarray::{ArrayD, Axis, Ix3, IxDyn};
use tracing::{debug, info};

use crate::{AxisId, GridAxis, OrderLocation, OrderTable, PerformanceGrid};

use super::{GridId, GridStore, StoreConfig, StoreError, check_shape};

/// The files making up a grid directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFile {
    ExposureTimeAxis,
    MagnitudeAxis,
    TemperatureAxis,
    RvPrecision,
    OrderRvPrecision,
    OrderSnr,
    OrderCenters,
}

impl GridFile {
    /// Returns the file name within the grid directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            GridFile::ExposureTimeAxis => "photon_grid_exptime.fits",
            GridFile::MagnitudeAxis => "photon_grid_vmag.fits",
            GridFile::TemperatureAxis => "photon_grid_teff.fits",
            GridFile::RvPrecision => "dv_uncertainty_master.fits",
            GridFile::OrderRvPrecision => "dv_uncertainty_master_order.fits",
            GridFile::OrderSnr => "snr_master_order.fits",
            GridFile::OrderCenters => "order_wvl_centers.fits",
        }
    }
}

#[derive(Debug)]
struct Axes {
    exptime: Arc<GridAxis>,
    magnitude: Arc<GridAxis>,
    temperature: Arc<GridAxis>,
}

impl Axes {
    fn get(&self, id: AxisId) -> &Arc<GridAxis> {
        match id {
            AxisId::ExposureTime => &self.exptime,
            AxisId::Magnitude => &self.magnitude,
            AxisId::Temperature => &self.temperature,
        }
    }

    fn all(&self) -> [&GridAxis; 3] {
        [&self.exptime, &self.magnitude, &self.temperature]
    }
}

/// A [`GridStore`] reading FITS images from a grid directory.
///
/// Each file is decoded at most once per store. A per-order cube is split
/// into one grid per order when first needed, and every grid is checked
/// against the axes as it is decoded.
///
/// Layout, in numpy axis order:
///
/// - axis files: 1-D primary image
/// - `dv_uncertainty_master.fits`: `(exptime, vmag, teff)`
/// - per-order files: `(order, exptime, vmag, teff)`
/// - `order_wvl_centers.fits`: `(2, order)`, row 0 the echelle order
///   numbers, row 1 the center wavelengths in nm
///
/// The reference soft limits are attached to the order table.
#[derive(Debug)]
pub struct FitsGridStore {
    dir: PathBuf,
    axes: OnceLock<Axes>,
    rv_precision: OnceLock<Arc<PerformanceGrid>>,
    order_rv_precision: OnceLock<Vec<Arc<PerformanceGrid>>>,
    order_snr: OnceLock<Vec<Arc<PerformanceGrid>>>,
    order_table: OnceLock<Arc<OrderTable>>,
}

impl FitsGridStore {
    /// Creates a store reading from `config.grid_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Format`] if the directory does not exist.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let dir = config.grid_dir.clone();
        if !dir.is_dir() {
            return Err(StoreError::Format {
                path: dir,
                reason: "grid directory does not exist".into(),
            });
        }
        info!(dir = %dir.display(), "opened FITS grid directory");
        Ok(Self {
            dir,
            axes: OnceLock::new(),
            rv_precision: OnceLock::new(),
            order_rv_precision: OnceLock::new(),
            order_snr: OnceLock::new(),
            order_table: OnceLock::new(),
        })
    }

    /// Returns the grid directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: GridFile) -> Result<(PathBuf, ArrayD<f64>), StoreError> {
        let path = self.dir.join(file.file_name());
        let image = read_primary_image(&path)?;
        info!(path = %path.display(), shape = ?image.shape(), "read FITS image");
        Ok((path, image))
    }

    fn axes(&self) -> Result<&Axes, StoreError> {
        load_once(&self.axes, || {
            Ok(Axes {
                exptime: Arc::new(self.read_axis(AxisId::ExposureTime)?),
                magnitude: Arc::new(self.read_axis(AxisId::Magnitude)?),
                temperature: Arc::new(self.read_axis(AxisId::Temperature)?),
            })
        })
    }

    fn read_axis(&self, id: AxisId) -> Result<GridAxis, StoreError> {
        let file = match id {
            AxisId::ExposureTime => GridFile::ExposureTimeAxis,
            AxisId::Magnitude => GridFile::MagnitudeAxis,
            AxisId::Temperature => GridFile::TemperatureAxis,
        };
        let (path, image) = self.read(file)?;
        if image.ndim() != 1 {
            return Err(format_error(
                &path,
                format!("expected a 1-D axis, got shape {:?}", image.shape()),
            ));
        }
        GridAxis::new(image.iter().copied().collect::<Vec<_>>())
            .map_err(|source| StoreError::Axis { axis: id, source })
    }

    fn read_rv_precision(&self) -> Result<Arc<PerformanceGrid>, StoreError> {
        let axes = self.axes()?;
        let (path, image) = self.read(GridFile::RvPrecision)?;
        let grid = to_grid(&path, GridId::RvPrecision, image)?;
        check_shape(GridId::RvPrecision, &grid, axes.all())?;
        Ok(Arc::new(grid))
    }

    /// Decodes a per-order cube into one checked grid per order.
    fn read_orders(
        &self,
        file: GridFile,
        id: fn(OrderLocation) -> GridId,
    ) -> Result<Vec<Arc<PerformanceGrid>>, StoreError> {
        let axes = self.axes()?;
        let (path, cube) = self.read(file)?;
        if cube.ndim() != 4 {
            return Err(format_error(
                &path,
                format!(
                    "expected a 4-D (order, exptime, vmag, teff) cube, got shape {:?}",
                    cube.shape()
                ),
            ));
        }

        let grids = cube
            .axis_iter(Axis(0))
            .enumerate()
            .map(|(index, slice)| {
                let grid_id = id(OrderLocation(index));
                let grid = to_grid(&path, grid_id, slice.to_owned())?;
                check_shape(grid_id, &grid, axes.all())?;
                Ok(Arc::new(grid))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        debug!(path = %path.display(), orders = grids.len(), "split per-order cube");
        Ok(grids)
    }

    fn read_order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        let (path, image) = self.read(GridFile::OrderCenters)?;
        if image.ndim() != 2 || image.shape()[0] < 2 {
            return Err(format_error(
                &path,
                format!("expected a (2, orders) table, got shape {:?}", image.shape()),
            ));
        }

        #[allow(clippy::cast_possible_truncation)]
        let numbers = image
            .index_axis(Axis(0), 0)
            .iter()
            .map(|n| n.round() as i32)
            .collect();
        let wavelengths = image.index_axis(Axis(0), 1).to_vec();

        let table = OrderTable::with_reference_soft_limits(numbers, wavelengths)?;
        Ok(Arc::new(table))
    }
}

impl GridStore for FitsGridStore {
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError> {
        Ok(Arc::clone(self.axes()?.get(id)))
    }

    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError> {
        let (grids, location) = match id {
            GridId::RvPrecision => {
                return load_once(&self.rv_precision, || self.read_rv_precision()).cloned();
            }
            GridId::OrderRvPrecision(location) => {
                let grids = load_once(&self.order_rv_precision, || {
                    self.read_orders(GridFile::OrderRvPrecision, GridId::OrderRvPrecision)
                })?;
                (grids, location)
            }
            GridId::OrderSnr(location) => {
                let grids = load_once(&self.order_snr, || {
                    self.read_orders(GridFile::OrderSnr, GridId::OrderSnr)
                })?;
                (grids, location)
            }
        };

        grids
            .get(location.0)
            .cloned()
            .ok_or(StoreError::OrderOutOfRange {
                location,
                len: grids.len(),
            })
    }

    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        load_once(&self.order_table, || self.read_order_table()).cloned()
    }
}

/// Returns the value in `cell`, loading it first if empty.
///
/// Failed loads leave the cell empty.
fn load_once<T>(
    cell: &OnceLock<T>,
    load: impl FnOnce() -> Result<T, StoreError>,
) -> Result<&T, StoreError> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = load()?;
    Ok(cell.get_or_init(|| value))
}

/// Reads the primary HDU image of `path` as `f64`, in numpy axis order.
fn read_primary_image(path: &Path) -> Result<ArrayD<f64>, StoreError> {
    let fits_error = |source| StoreError::Fits {
        path: path.to_path_buf(),
        source,
    };

    let mut fptr = FitsFile::open(path).map_err(fits_error)?;
    let hdu = fptr.primary_hdu().map_err(fits_error)?;

    let shape = match &hdu.info {
        HduInfo::ImageInfo { shape, .. } => shape.clone(),
        HduInfo::TableInfo { .. } | HduInfo::AnyInfo => {
            return Err(format_error(path, "primary HDU is not an image".to_string()));
        }
    };

    let data: Vec<f64> = hdu.read_image(&mut fptr).map_err(fits_error)?;
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|err| {
        format_error(path, format!("image data does not match shape {shape:?}: {err}"))
    })
}

fn to_grid(path: &Path, id: GridId, image: ArrayD<f64>) -> Result<PerformanceGrid, StoreError> {
    let values = image.into_dimensionality::<Ix3>().map_err(|_| {
        format_error(path, "expected a 3-D (exptime, vmag, teff) grid".to_string())
    })?;
    PerformanceGrid::new(values).map_err(|source| StoreError::Grid { grid: id, source })
}

fn format_error(path: &Path, reason: String) -> StoreError {
    StoreError::Format {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use fitsio::images::{ImageDescription, ImageType};
    use ndarray::{Array1, Array2, Array3, Array4};

    use crate::{GridPoint, REFERENCE_SOFT_LIMITS};

    use super::*;

    const EXPTIME: [f64; 3] = [10.0, 100.0, 1000.0];
    const MAGNITUDE: [f64; 2] = [6.0, 10.0];
    const TEMPERATURE: [f64; 4] = [4000.0, 5000.0, 6000.0, 7000.0];

    /// Writes `values` as the primary image of `file`, numpy shape preserved.
    fn write_image<D: ndarray::Dimension>(
        dir: &Path,
        file: GridFile,
        values: &ndarray::Array<f64, D>,
    ) {
        let description = ImageDescription {
            data_type: ImageType::Double,
            dimensions: values.shape(),
        };
        let mut fptr = FitsFile::create(dir.join(file.file_name()))
            .with_custom_primary(&description)
            .overwrite()
            .open()
            .unwrap();
        let hdu = fptr.primary_hdu().unwrap();
        let data: Vec<f64> = values.iter().copied().collect();
        hdu.write_image(&mut fptr, &data).unwrap();
    }

    /// Distinct value for every `(order, i, j, k)` cell.
    fn cell(order: usize, i: usize, j: usize, k: usize) -> f64 {
        (1000 * order + 100 * i + 10 * j + k) as f64 + 1.0
    }

    fn write_grid_dir(dir: &Path, orders: usize) {
        let shape = (EXPTIME.len(), MAGNITUDE.len(), TEMPERATURE.len());
        let cube_shape = (orders, shape.0, shape.1, shape.2);

        write_image(dir, GridFile::ExposureTimeAxis, &Array1::from(EXPTIME.to_vec()));
        write_image(dir, GridFile::MagnitudeAxis, &Array1::from(MAGNITUDE.to_vec()));
        write_image(dir, GridFile::TemperatureAxis, &Array1::from(TEMPERATURE.to_vec()));
        write_image(
            dir,
            GridFile::RvPrecision,
            &Array3::from_shape_fn(shape, |(i, j, k)| cell(0, i, j, k)),
        );
        write_image(
            dir,
            GridFile::OrderRvPrecision,
            &Array4::from_shape_fn(cube_shape, |(o, i, j, k)| -cell(o, i, j, k)),
        );
        write_image(
            dir,
            GridFile::OrderSnr,
            &Array4::from_shape_fn(cube_shape, |(o, i, j, k)| cell(o, i, j, k)),
        );
        write_image(
            dir,
            GridFile::OrderCenters,
            &Array2::from_shape_fn((2, orders), |(row, o)| {
                if row == 0 { 173.0 - o as f64 + 0.2 } else { 380.0 + 2.5 * o as f64 }
            }),
        );
    }

    fn open(dir: &Path) -> FitsGridStore {
        FitsGridStore::open(&StoreConfig::new(dir)).unwrap()
    }

    fn value(grid: &PerformanceGrid, i: usize, j: usize, k: usize) -> f64 {
        grid.value_at(GridPoint::new(i as f64, j as f64, k as f64))
            .unwrap()
    }

    #[test]
    fn missing_directory_is_rejected() {
        let config = StoreConfig::new("/nonexistent/etcalc/grids");

        assert!(matches!(
            FitsGridStore::open(&config),
            Err(StoreError::Format { .. })
        ));
    }

    #[test]
    fn file_names_match_grid_directory_layout() {
        assert_eq!(GridFile::ExposureTimeAxis.file_name(), "photon_grid_exptime.fits");
        assert_eq!(GridFile::OrderCenters.file_name(), "order_wvl_centers.fits");
    }

    #[test]
    fn reads_axes_and_grids_in_numpy_order() {
        let dir = tempfile::tempdir().unwrap();
        write_grid_dir(dir.path(), REFERENCE_SOFT_LIMITS.len());
        let store = open(dir.path());

        assert_eq!(store.axis(AxisId::ExposureTime).unwrap().values(), &EXPTIME);
        assert_eq!(store.axis(AxisId::Magnitude).unwrap().values(), &MAGNITUDE);
        assert_eq!(store.axis(AxisId::Temperature).unwrap().values(), &TEMPERATURE);

        let rv = store.grid(GridId::RvPrecision).unwrap();
        assert_eq!(rv.shape(), (3, 2, 4));
        assert_eq!(value(&rv, 2, 1, 3), cell(0, 2, 1, 3));

        let snr = store.grid(GridId::OrderSnr(OrderLocation(7))).unwrap();
        assert_eq!(value(&snr, 1, 0, 2), cell(7, 1, 0, 2));

        let order_rv = store.grid(GridId::OrderRvPrecision(OrderLocation(94))).unwrap();
        assert_eq!(value(&order_rv, 0, 1, 1), -cell(94, 0, 1, 1));
    }

    #[test]
    fn per_order_grids_come_from_one_decode() {
        let dir = tempfile::tempdir().unwrap();
        write_grid_dir(dir.path(), REFERENCE_SOFT_LIMITS.len());
        let store = open(dir.path());

        let first = store.grid(GridId::OrderSnr(OrderLocation(3))).unwrap();
        let second = store.grid(GridId::OrderSnr(OrderLocation(3))).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Later reads are served from memory even after the file is gone.
        std::fs::remove_file(dir.path().join(GridFile::OrderSnr.file_name())).unwrap();
        assert!(store.grid(GridId::OrderSnr(OrderLocation(50))).is_ok());

        assert!(matches!(
            store.grid(GridId::OrderSnr(OrderLocation(95))),
            Err(StoreError::OrderOutOfRange { len: 95, .. })
        ));
    }

    #[test]
    fn parses_order_table() {
        let dir = tempfile::tempdir().unwrap();
        write_grid_dir(dir.path(), REFERENCE_SOFT_LIMITS.len());
        let store = open(dir.path());

        let table = store.order_table().unwrap();
        assert_eq!(table.len(), REFERENCE_SOFT_LIMITS.len());

        let order = table.get(OrderLocation(2)).unwrap();
        assert_eq!(order.number, 171);
        assert_eq!(order.wavelength_nm, 385.0);
        assert_eq!(order.soft_limit, REFERENCE_SOFT_LIMITS[2]);
    }

    #[test]
    fn order_table_must_match_soft_limits() {
        let dir = tempfile::tempdir().unwrap();
        write_grid_dir(dir.path(), 3);
        let store = open(dir.path());

        assert!(matches!(
            store.order_table(),
            Err(StoreError::Order(crate::OrderError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn rejects_grid_shaped_unlike_axes() {
        let dir = tempfile::tempdir().unwrap();
        write_grid_dir(dir.path(), 2);
        write_image(
            dir.path(),
            GridFile::RvPrecision,
            &Array3::from_elem((3, 4, 2), 1.0),
        );
        let store = open(dir.path());

        assert!(matches!(
            store.grid(GridId::RvPrecision),
            Err(StoreError::ShapeMismatch {
                expected: (3, 2, 4),
                actual: (3, 4, 2),
                ..
            })
        ));
        assert!(store.grid(GridId::OrderSnr(OrderLocation(1))).is_ok());
    }
}
