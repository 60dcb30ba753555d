use std::sync::Arc;

use crate::{AxisId, GridAxis, OrderLocation, OrderTable, PerformanceGrid};

use super::{GridId, GridStore, StoreError, check_shape};

/// The per-order grids of one spectral order.
#[derive(Debug)]
pub struct OrderGrids {
    pub rv_precision: PerformanceGrid,
    pub snr: PerformanceGrid,
}

/// A [`GridStore`] whose data is already in memory.
///
/// All shapes and counts are validated on construction, so reads never fail
/// except for out-of-range order locations.
#[derive(Debug)]
pub struct MemoryGridStore {
    exptime: Arc<GridAxis>,
    magnitude: Arc<GridAxis>,
    temperature: Arc<GridAxis>,
    rv_precision: Arc<PerformanceGrid>,
    order_table: Arc<OrderTable>,
    order_rv_precision: Vec<Arc<PerformanceGrid>>,
    order_snr: Vec<Arc<PerformanceGrid>>,
}

impl MemoryGridStore {
    /// Creates a store from axes, grids, and the order table.
    ///
    /// `order_grids` must hold one entry per order, in order-table order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShapeMismatch`] if any grid's shape differs from
    /// the axis lengths, or [`StoreError::OrderCountMismatch`] if the number
    /// of per-order grids differs from the order count.
    pub fn new(
        exptime: GridAxis,
        magnitude: GridAxis,
        temperature: GridAxis,
        rv_precision: PerformanceGrid,
        order_table: OrderTable,
        order_grids: Vec<OrderGrids>,
    ) -> Result<Self, StoreError> {
        if order_grids.len() != order_table.len() {
            return Err(StoreError::OrderCountMismatch {
                what: "per-order grid set",
                expected: order_table.len(),
                actual: order_grids.len(),
            });
        }

        let axes = [&exptime, &magnitude, &temperature];
        check_shape(GridId::RvPrecision, &rv_precision, axes)?;

        let mut order_rv_precision = Vec::with_capacity(order_grids.len());
        let mut order_snr = Vec::with_capacity(order_grids.len());
        for (index, grids) in order_grids.into_iter().enumerate() {
            let location = OrderLocation(index);
            check_shape(GridId::OrderRvPrecision(location), &grids.rv_precision, axes)?;
            check_shape(GridId::OrderSnr(location), &grids.snr, axes)?;
            order_rv_precision.push(Arc::new(grids.rv_precision));
            order_snr.push(Arc::new(grids.snr));
        }

        Ok(Self {
            exptime: Arc::new(exptime),
            magnitude: Arc::new(magnitude),
            temperature: Arc::new(temperature),
            rv_precision: Arc::new(rv_precision),
            order_table: Arc::new(order_table),
            order_rv_precision,
            order_snr,
        })
    }

    fn order_grid(
        grids: &[Arc<PerformanceGrid>],
        location: OrderLocation,
    ) -> Result<Arc<PerformanceGrid>, StoreError> {
        grids
            .get(location.0)
            .cloned()
            .ok_or(StoreError::OrderOutOfRange {
                location,
                len: grids.len(),
            })
    }
}

impl GridStore for MemoryGridStore {
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError> {
        Ok(Arc::clone(match id {
            AxisId::ExposureTime => &self.exptime,
            AxisId::Magnitude => &self.magnitude,
            AxisId::Temperature => &self.temperature,
        }))
    }

    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError> {
        match id {
            GridId::RvPrecision => Ok(Arc::clone(&self.rv_precision)),
            GridId::OrderRvPrecision(location) => {
                Self::order_grid(&self.order_rv_precision, location)
            }
            GridId::OrderSnr(location) => Self::order_grid(&self.order_snr, location),
        }
    }

    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        Ok(Arc::clone(&self.order_table))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    fn axis(values: &[f64]) -> GridAxis {
        GridAxis::new(values.to_vec()).unwrap()
    }

    fn grid(shape: (usize, usize, usize), fill: f64) -> PerformanceGrid {
        PerformanceGrid::new(Array3::from_elem(shape, fill)).unwrap()
    }

    fn order_table(count: usize) -> OrderTable {
        OrderTable::new(
            (0..count).map(|i| 100 + i as i32).collect(),
            (0..count).map(|i| 500.0 + i as f64).collect(),
            vec![500.0; count],
        )
        .unwrap()
    }

    fn store(order_shape: (usize, usize, usize)) -> Result<MemoryGridStore, StoreError> {
        MemoryGridStore::new(
            axis(&[10.0, 100.0, 1000.0]),
            axis(&[6.0, 10.0]),
            axis(&[4000.0, 5000.0, 6000.0, 7000.0]),
            grid((3, 2, 4), 1.0),
            order_table(2),
            vec![
                OrderGrids {
                    rv_precision: grid((3, 2, 4), 2.0),
                    snr: grid((3, 2, 4), 20.0),
                },
                OrderGrids {
                    rv_precision: grid((3, 2, 4), 3.0),
                    snr: grid(order_shape, 30.0),
                },
            ],
        )
    }

    #[test]
    fn serves_axes_grids_and_orders() {
        let store = store((3, 2, 4)).unwrap();

        assert_eq!(store.axis(AxisId::Magnitude).unwrap().values(), &[6.0, 10.0]);
        assert_eq!(store.grid(GridId::RvPrecision).unwrap().shape(), (3, 2, 4));
        assert_eq!(store.order_table().unwrap().len(), 2);

        let snr = store.grid(GridId::OrderSnr(OrderLocation(1))).unwrap();
        let value = snr
            .value_at(crate::GridPoint::new(1.0, 0.5, 2.0))
            .unwrap();
        assert_eq!(value, 30.0);
    }

    #[test]
    fn rejects_out_of_range_order() {
        let store = store((3, 2, 4)).unwrap();

        assert!(matches!(
            store.grid(GridId::OrderRvPrecision(OrderLocation(2))),
            Err(StoreError::OrderOutOfRange { len: 2, .. })
        ));
    }

    #[test]
    fn validates_grid_shapes() {
        let err = store((3, 4, 2)).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ShapeMismatch {
                grid: GridId::OrderSnr(OrderLocation(1)),
                expected: (3, 2, 4),
                actual: (3, 4, 2),
            }
        ));
    }

    #[test]
    fn validates_order_count() {
        let err = MemoryGridStore::new(
            axis(&[10.0, 100.0]),
            axis(&[6.0, 10.0]),
            axis(&[4000.0, 5000.0]),
            grid((2, 2, 2), 1.0),
            order_table(3),
            Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            StoreError::OrderCountMismatch {
                expected: 3,
                actual: 0,
                ..
            }
        ));
    }
}
