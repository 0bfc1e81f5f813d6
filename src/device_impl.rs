#[cfg(not(feature = "async"))]
use embedded_hal::i2c::{I2c, Operation};
#[cfg(feature = "async")]
use embedded_hal_async::i2c::{I2c, Operation};

use crate::{decode, reg, Error, Measurement, Reading, DEFAULT_SEA_LEVEL_PRESSURE};

/// Bus opened by [`MPL3115A2::open_default`].
#[cfg(feature = "linux")]
pub const DEFAULT_BUS: &str = "/dev/i2c-1";

/// MPL3115A2 driver
///
/// Every reading is a one-shot conversion: write `CTRL_REG1` with the
/// trigger (and mode) bits, read the output registers straight away,
/// decode. There is no wait or status poll between trigger and read.
pub struct MPL3115A2<I2C> {
    i2c: I2C,
    address: u8,
    sea_level_pressure: u32,
}

impl<I2C> MPL3115A2<I2C> {
    /// Wrap an I²C bus using the standard atmosphere as the altitude reference.
    pub fn new(i2c: I2C) -> Self {
        Self::with_sea_level_pressure(i2c, DEFAULT_SEA_LEVEL_PRESSURE)
    }

    /// Wrap an I²C bus with a sea-level reference pressure in pascals.
    ///
    /// The reference is only sent to the device as part of an altitude
    /// reading, and cannot be changed afterwards.
    pub fn with_sea_level_pressure(i2c: I2C, sea_level_pressure: u32) -> Self {
        Self {
            i2c,
            address: reg::DEVICE_ADDRESS,
            sea_level_pressure,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn sea_level_pressure(&self) -> u32 {
        self.sea_level_pressure
    }

    /// Give back the I²C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(feature = "linux")]
impl MPL3115A2<linux_embedded_hal::I2cdev> {
    /// Open a Linux I²C character device, e.g. `/dev/i2c-1`.
    ///
    /// The device is not probed; use [`MPL3115A2::verify`] for that.
    pub fn open(
        bus: &str,
        sea_level_pressure: u32,
    ) -> Result<Self, Error<linux_embedded_hal::I2CError>> {
        linux_embedded_hal::I2cdev::new(bus)
            .map(|i2c| Self::with_sea_level_pressure(i2c, sea_level_pressure))
            .map_err(|e| Error::BusOpen(e.into()))
    }

    /// Open [`DEFAULT_BUS`] with the default sea-level pressure.
    pub fn open_default() -> Result<Self, Error<linux_embedded_hal::I2CError>> {
        Self::open(DEFAULT_BUS, DEFAULT_SEA_LEVEL_PRESSURE)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), keep_self),
    async(feature = "async", keep_self)
)]
impl<I2C, E> MPL3115A2<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Write `payload` starting at `register` in a single transaction.
    ///
    /// Adjacent write operations go out as one write with no repeated
    /// start, so the payload length is not limited by the driver.
    /// Returns the driver so calls can be chained; no driver state changes.
    pub async fn write_register(&mut self, register: u8, payload: &[u8]) -> Result<&mut Self, Error<E>> {
        trace!("write {:#x}: {:?}", register, payload);
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[register]), Operation::Write(payload)],
            )
            .await
            .map_err(Error::I2c)?;
        Ok(self)
    }

    /// Read `N` consecutive registers starting at `register`.
    pub async fn read_register<const N: usize>(&mut self, register: u8) -> Result<[u8; N], Error<E>> {
        let mut data = [0u8; N];
        self.i2c
            .write_read(self.address, &[register], &mut data)
            .await
            .map_err(Error::I2c)?;
        trace!("read {:#x}: {:?}", register, &data[..]);
        Ok(data)
    }

    /// Write `CTRL_REG1`, usually some combination of
    /// [`reg::CTRL_REG1_OST`] and [`reg::CTRL_REG1_ALT`].
    pub async fn set_control_register_1(&mut self, bits: u8) -> Result<&mut Self, Error<E>> {
        self.write_register(reg::CTRL_REG1, &[bits]).await
    }

    /// Load the sea-level reference pressure into `BAR_IN_MSB`/`BAR_IN_LSB`.
    ///
    /// The register holds pressure in units of 2 Pa, big-endian, so references
    /// above 131 071 Pa are rejected with [`Error::InvalidData`] before any
    /// bus traffic.
    pub async fn write_barometric_input(&mut self) -> Result<&mut Self, Error<E>> {
        let input = cast::u16(self.sea_level_pressure >> 1).map_err(|_| Error::InvalidData)?;
        self.write_register(reg::BAR_IN_MSB, &input.to_be_bytes()).await
    }

    /// Contents of `WHO_AM_I`
    pub async fn whoami(&mut self) -> Result<u8, Error<E>> {
        let [id] = self.read_register::<1>(reg::WHO_AM_I).await?;
        Ok(id)
    }

    /// Check `WHO_AM_I` against the MPL3115A2 device id.
    ///
    /// Readings never call this; it is up to the caller to do so once after
    /// construction if the bus might hold something else at 0x60.
    pub async fn verify(&mut self) -> Result<(), Error<E>> {
        let id = self.whoami().await?;
        if id != reg::DEVICE_ID {
            warn!("unexpected WHO_AM_I {:#x}", id);
            return Err(Error::UnsupportedChip);
        }
        Ok(())
    }

    /// Take a one-shot reading of `measurement`.
    pub async fn get_reading(&mut self, measurement: Measurement) -> Result<Reading, Error<E>> {
        let reading = match measurement {
            Measurement::Altitude => self.altitude().await.map(Reading::Altitude),
            Measurement::Pressure => self.pressure().await.map(Reading::Pressure),
            Measurement::Temperature => self.temperature().await.map(Reading::Temperature),
        }?;
        debug!("{:?}", reading);
        Ok(reading)
    }

    /// Altitude in metres relative to the sea-level reference pressure.
    pub async fn altitude(&mut self) -> Result<f32, Error<E>> {
        self.write_barometric_input().await?;
        self.set_control_register_1(reg::CTRL_REG1_OST | reg::CTRL_REG1_ALT)
            .await?;
        self.read_register::<3>(reg::ALTITUDE_DATA)
            .await
            .map(decode::altitude)
    }

    /// Pressure in whole pascals.
    pub async fn pressure(&mut self) -> Result<u32, Error<E>> {
        self.set_control_register_1(reg::CTRL_REG1_OST).await?;
        self.read_register::<3>(reg::PRESSURE_DATA)
            .await
            .map(decode::pressure)
    }

    /// Temperature in °C.
    pub async fn temperature(&mut self) -> Result<f32, Error<E>> {
        self.set_control_register_1(reg::CTRL_REG1_OST).await?;
        self.read_register::<2>(reg::TEMPERATURE_DATA)
            .await
            .map(decode::temperature)
    }
}



#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use embedded_hal_async::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use futures::executor::block_on;

    const ADDR: u8 = reg::DEVICE_ADDRESS;

    #[test]
    fn pressure_reading() {
        let i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x26]),
            I2cTransaction::write(ADDR, vec![0x02]),
            I2cTransaction::transaction_end(ADDR),
            I2cTransaction::write_read(ADDR, vec![0x01], vec![0x62, 0xF3, 0x80]),
        ]);
        let mut sensor = MPL3115A2::new(i2c);
        assert_eq!(
            block_on(sensor.get_reading(Measurement::Pressure)),
            Ok(Reading::Pressure(101_326))
        );
        let mut i2c = sensor.release();
        i2c.done();
    }

    #[test]
    fn altitude_stops_at_failed_trigger() {
        let i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x14]),
            I2cTransaction::write(ADDR, vec![0xC5, 0xE7]),
            I2cTransaction::transaction_end(ADDR),
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x26]),
            I2cTransaction::write(ADDR, vec![0x82]).with_error(ErrorKind::Other),
        ]);
        let mut sensor = MPL3115A2::new(i2c);
        assert_eq!(
            block_on(sensor.altitude()),
            Err(Error::I2c(ErrorKind::Other))
        );
        let mut i2c = sensor.release();
        i2c.done();
    }
}
