use std::fmt;

use thiserror::Error;

use crate::soft_limits::REFERENCE_SOFT_LIMITS;

/// Position of a spectral order within an [`OrderTable`].
///
/// Per-order grids in a [`GridStore`](crate::GridStore) are addressed by
/// location, not by echelle order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderLocation(pub usize);

impl fmt::Display for OrderLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tabulated spectral order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralOrder {
    /// Echelle order number.
    pub number: i32,
    /// Representative (center) wavelength, in nm.
    pub wavelength_nm: f64,
    /// SNR above which detector saturation is assumed.
    pub soft_limit: f64,
}

/// Errors from building or querying an [`OrderTable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("order table is empty")]
    Empty,

    #[error("order table columns differ in length: {numbers} numbers, {wavelengths} wavelengths, {soft_limits} soft limits")]
    LengthMismatch {
        numbers: usize,
        wavelengths: usize,
        soft_limits: usize,
    },

    #[error("order {number} has an invalid wavelength ({wavelength_nm}) or soft limit ({soft_limit})")]
    InvalidEntry {
        number: i32,
        wavelength_nm: f64,
        soft_limit: f64,
    },

    #[error("no order is centered within {tolerance_nm} nm of {wavelength_nm} nm")]
    UnresolvedWavelength {
        wavelength_nm: f64,
        tolerance_nm: f64,
    },

    #[error("order {number} is not tabulated")]
    UnknownOrder { number: i32 },
}

/// The spectral orders tabulated for an instrument.
///
/// Every order carries its center wavelength and saturation soft limit, so
/// the soft-limit vector always has one entry per order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTable {
    orders: Vec<SpectralOrder>,
}

impl OrderTable {
    /// Creates a table from parallel columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, the columns differ in length,
    /// or any wavelength or soft limit is not finite and positive.
    pub fn new(
        numbers: Vec<i32>,
        wavelengths_nm: Vec<f64>,
        soft_limits: Vec<f64>,
    ) -> Result<Self, OrderError> {
        if numbers.len() != wavelengths_nm.len() || numbers.len() != soft_limits.len() {
            return Err(OrderError::LengthMismatch {
                numbers: numbers.len(),
                wavelengths: wavelengths_nm.len(),
                soft_limits: soft_limits.len(),
            });
        }
        if numbers.is_empty() {
            return Err(OrderError::Empty);
        }

        let orders = numbers
            .into_iter()
            .zip(wavelengths_nm)
            .zip(soft_limits)
            .map(|((number, wavelength_nm), soft_limit)| {
                let valid = |v: f64| v.is_finite() && v > 0.0;
                if valid(wavelength_nm) && valid(soft_limit) {
                    Ok(SpectralOrder {
                        number,
                        wavelength_nm,
                        soft_limit,
                    })
                } else {
                    Err(OrderError::InvalidEntry {
                        number,
                        wavelength_nm,
                        soft_limit,
                    })
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { orders })
    }

    /// Creates a table using the reference instrument's soft limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the columns do not match the reference order count
    /// or contain invalid entries.
    pub fn with_reference_soft_limits(
        numbers: Vec<i32>,
        wavelengths_nm: Vec<f64>,
    ) -> Result<Self, OrderError> {
        Self::new(numbers, wavelengths_nm, REFERENCE_SOFT_LIMITS.to_vec())
    }

    /// Returns the number of orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Always `false`; a table has at least one order.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the order at `location`, if any.
    #[must_use]
    pub fn get(&self, location: OrderLocation) -> Option<&SpectralOrder> {
        self.orders.get(location.0)
    }

    /// Iterates over orders with their locations.
    pub fn iter(&self) -> impl Iterator<Item = (OrderLocation, &SpectralOrder)> {
        self.orders
            .iter()
            .enumerate()
            .map(|(index, order)| (OrderLocation(index), order))
    }

    /// Finds the first order centered strictly within `tolerance_nm` of `wavelength_nm`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnresolvedWavelength`] if no order is close enough.
    pub fn locate_wavelength(
        &self,
        wavelength_nm: f64,
        tolerance_nm: f64,
    ) -> Result<OrderLocation, OrderError> {
        self.orders
            .iter()
            .position(|order| (order.wavelength_nm - wavelength_nm).abs() < tolerance_nm)
            .map(OrderLocation)
            .ok_or(OrderError::UnresolvedWavelength {
                wavelength_nm,
                tolerance_nm,
            })
    }

    /// Finds the order with echelle number `number`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownOrder`] if the number is not tabulated.
    pub fn locate_number(&self, number: i32) -> Result<OrderLocation, OrderError> {
        self.orders
            .iter()
            .position(|order| order.number == number)
            .map(OrderLocation)
            .ok_or(OrderError::UnknownOrder { number })
    }
}
