//! Vehicles assembled from components.
//!
//! A [`Vehicle`] is one struct that owns its parts: a [`Body`], a
//! [`Powertrain`], a set of [`Wheels`], and optional extras ([`Gps`],
//! [`AudioSystem`], [`ClimateControl`]). Behavior
//! that differs between, say, a petrol car and an electric car is decided by
//! the powertrain it was built with, not by a type hierarchy. Capabilities
//! are exposed through the [`Drivable`] and [`Chargeable`] traits.

use core::fmt;

use crate::error::ErrorKind;

/// Errors raised by vehicle operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VehicleError {
    #[error("cannot accelerate; the vehicle is not running")]
    NotRunning,

    #[error("insufficient battery power: need {needed}%, have {level}%")]
    InsufficientBattery { needed: u8, level: u8 },

    #[error("battery is already fully charged")]
    BatteryFull,

    #[error("already charging")]
    AlreadyCharging,

    #[error("not currently charging")]
    NotCharging,

    #[error("GPS is off")]
    GpsOff,

    #[error("no GPS system installed")]
    NoGps,

    #[error("audio system is off")]
    AudioOff,

    #[error("climate control is off")]
    ClimateOff,
}

impl VehicleError {
    /// Every vehicle error is an illegal operation for the current state.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::State
    }
}

// =============================================================================
// Components
// =============================================================================

/// What an engine runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Gasoline,
    Regular,
    Premium,
    Electric,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gasoline => "Gasoline",
            Self::Regular => "Regular",
            Self::Premium => "Premium",
            Self::Electric => "Electric",
        })
    }
}

/// An engine or electric motor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    horsepower: u32,
    fuel: FuelType,
    running: bool,
    temperature_f: u32,
}

impl Engine {
    /// Temperature when stopped, °F.
    pub const IDLE_TEMP_F: u32 = 70;
    /// Temperature when running, °F.
    pub const RUNNING_TEMP_F: u32 = 180;

    #[must_use]
    pub const fn new(horsepower: u32, fuel: FuelType) -> Self {
        Self {
            horsepower,
            fuel,
            running: false,
            temperature_f: Self::IDLE_TEMP_F,
        }
    }

    #[must_use]
    pub const fn horsepower(&self) -> u32 {
        self.horsepower
    }

    #[must_use]
    pub const fn fuel(&self) -> FuelType {
        self.fuel
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Start the engine. Returns `false` if it was already running.
    pub const fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.temperature_f = Self::RUNNING_TEMP_F;
        true
    }

    /// Stop the engine. Returns `false` if it was already stopped.
    pub const fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.temperature_f = Self::IDLE_TEMP_F;
        true
    }

    #[must_use]
    pub fn status(&self) -> String {
        let state = if self.running { "Running" } else { "Stopped" };
        format!("Engine: {state}, Temp: {}°F", self.temperature_f)
    }
}

/// How quickly a battery recharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargingSpeed {
    Standard,
    Fast,
}

impl fmt::Display for ChargingSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "Standard",
            Self::Fast => "Fast",
        })
    }
}

/// A traction battery. Starts fully charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battery {
    capacity_kwh: u32,
    level: u8,
    charging_speed: ChargingSpeed,
    charging: bool,
}

impl Battery {
    pub const FULL: u8 = 100;

    #[must_use]
    pub const fn new(capacity_kwh: u32, charging_speed: ChargingSpeed) -> Self {
        Self {
            capacity_kwh,
            level: Self::FULL,
            charging_speed,
            charging: false,
        }
    }

    #[must_use]
    pub const fn capacity_kwh(&self) -> u32 {
        self.capacity_kwh
    }

    #[must_use]
    pub const fn charging_speed(&self) -> ChargingSpeed {
        self.charging_speed
    }

    #[must_use]
    pub const fn is_charging(&self) -> bool {
        self.charging
    }

    /// Use `percent` of the charge. Returns `false`, draining nothing, if
    /// there is not enough left.
    pub const fn drain(&mut self, percent: u8) -> bool {
        if self.level < percent {
            return false;
        }
        self.level -= percent;
        true
    }

    /// Put back up to `percent`, never above full. Returns the amount
    /// actually recovered.
    pub fn recover(&mut self, percent: u8) -> u8 {
        let recovered = percent.min(Self::FULL - self.level);
        self.level += recovered;
        recovered
    }

    #[must_use]
    pub fn status(&self) -> String {
        let charging = if self.charging {
            "Charging"
        } else {
            "Not Charging"
        };
        format!(
            "Battery: {}% of {} kWh ({} charging, {charging})",
            self.level, self.capacity_kwh, self.charging_speed
        )
    }
}

/// Tyre type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelKind {
    Standard,
    AllSeason,
    Performance,
    Sport,
    LowRollingResistance,
}

impl fmt::Display for WheelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "Standard",
            Self::AllSeason => "All-Season",
            Self::Performance => "Performance",
            Self::Sport => "Sport",
            Self::LowRollingResistance => "Low Rolling Resistance",
        })
    }
}

/// A matched set of wheels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheels {
    count: u8,
    size_in: u8,
    kind: WheelKind,
    pressure_psi: u32,
}

impl Wheels {
    /// Pressure of new tyres.
    pub const DEFAULT_PSI: u32 = 32;
    /// Inflation stops here.
    pub const MAX_PSI: u32 = 50;

    #[must_use]
    pub const fn new(count: u8, size_in: u8, kind: WheelKind) -> Self {
        Self {
            count,
            size_in,
            kind,
            pressure_psi: Self::DEFAULT_PSI,
        }
    }

    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    #[must_use]
    pub const fn size_in(&self) -> u8 {
        self.size_in
    }

    #[must_use]
    pub const fn kind(&self) -> WheelKind {
        self.kind
    }

    #[must_use]
    pub const fn pressure(&self) -> u32 {
        self.pressure_psi
    }

    /// Add `psi`, capped at [`MAX_PSI`](Self::MAX_PSI). Returns the new
    /// pressure.
    pub fn inflate(&mut self, psi: u32) -> u32 {
        self.pressure_psi = self.pressure_psi.saturating_add(psi).min(Self::MAX_PSI);
        self.pressure_psi
    }

    #[must_use]
    pub fn check_pressure(&self) -> String {
        format!(
            "{} {}\" {} wheels at {} PSI",
            self.count, self.size_in, self.kind, self.pressure_psi
        )
    }
}

/// Satellite navigation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gps {
    on: bool,
    location: Option<String>,
    destination: Option<String>,
}

impl Gps {
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    pub fn turn_on(&mut self) {
        self.on = true;
        self.location = Some("Current Location".to_owned());
    }

    /// # Errors
    ///
    /// Returns `VehicleError::GpsOff` if the unit is off.
    pub fn set_destination(&mut self, destination: impl Into<String>) -> Result<(), VehicleError> {
        if !self.on {
            return Err(VehicleError::GpsOff);
        }
        self.destination = Some(destination.into());
        Ok(())
    }

    /// Route description, once on and given a destination.
    #[must_use]
    pub fn directions(&self) -> Option<String> {
        match (&self.location, &self.destination) {
            (Some(from), Some(to)) if self.on => Some(format!("Navigate from {from} to {to}")),
            _ => None,
        }
    }
}

/// In-car audio. Volume is a percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSystem {
    brand: String,
    watts: u32,
    volume: u8,
    on: bool,
}

impl AudioSystem {
    pub const MAX_VOLUME: u8 = 100;

    #[must_use]
    pub fn new(brand: impl Into<String>, watts: u32) -> Self {
        Self {
            brand: brand.into(),
            watts,
            volume: 0,
            on: false,
        }
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub const fn watts(&self) -> u32 {
        self.watts
    }

    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    pub fn turn_on(&mut self) -> String {
        self.on = true;
        format!("{} audio system on", self.brand)
    }

    /// Set the volume, capped at [`MAX_VOLUME`](Self::MAX_VOLUME). Returns
    /// the level applied.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::AudioOff` if the system is off.
    pub fn set_volume(&mut self, volume: u32) -> Result<u8, VehicleError> {
        if !self.on {
            return Err(VehicleError::AudioOff);
        }
        self.volume = u8::try_from(volume).unwrap_or(u8::MAX).min(Self::MAX_VOLUME);
        Ok(self.volume)
    }
}

/// Cabin climate control. Temperatures are °F.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateControl {
    temperature_f: u32,
    on: bool,
}

impl ClimateControl {
    pub const DEFAULT_TEMP_F: u32 = 72;
    pub const MIN_TEMP_F: u32 = 60;
    pub const MAX_TEMP_F: u32 = 85;

    #[must_use]
    pub const fn temperature_f(&self) -> u32 {
        self.temperature_f
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Climate control always runs in automatic mode.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        "Auto"
    }

    pub fn turn_on(&mut self) -> String {
        self.on = true;
        "Climate control activated".to_owned()
    }

    /// Set the target, clamped to `60..=85`. Returns the target applied.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::ClimateOff` if the unit is off.
    pub fn set_temperature(&mut self, temperature_f: u32) -> Result<u32, VehicleError> {
        if !self.on {
            return Err(VehicleError::ClimateOff);
        }
        self.temperature_f = temperature_f.clamp(Self::MIN_TEMP_F, Self::MAX_TEMP_F);
        Ok(self.temperature_f)
    }
}

impl Default for ClimateControl {
    fn default() -> Self {
        Self {
            temperature_f: Self::DEFAULT_TEMP_F,
            on: false,
        }
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// Body style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Car { doors: u8 },
    Motorcycle { engine_cc: u32 },
}

/// What turns the wheels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Powertrain {
    Combustion(Engine),
    Electric { motor: Engine, battery: Battery },
}

impl Powertrain {
    const fn engine(&self) -> &Engine {
        match self {
            Self::Combustion(engine) | Self::Electric { motor: engine, .. } => engine,
        }
    }

    const fn engine_mut(&mut self) -> &mut Engine {
        match self {
            Self::Combustion(engine) | Self::Electric { motor: engine, .. } => engine,
        }
    }
}

/// Driving controls.
pub trait Drivable {
    /// Start the vehicle. Returns `false` if it was already running.
    fn start(&mut self) -> bool;

    /// Stop the vehicle, bringing it to rest. Returns `false` if it was
    /// already stopped.
    fn stop(&mut self) -> bool;

    /// Speed up by `increase` mph, returning the new speed.
    ///
    /// # Errors
    ///
    /// Implementations reject acceleration they cannot perform.
    fn accelerate(&mut self, increase: u32) -> Result<u32, VehicleError>;

    /// Slow down by up to `decrease` mph, returning the new speed.
    fn brake(&mut self, decrease: u32) -> u32;

    fn speed(&self) -> u32;
}

/// Anything with a rechargeable battery.
pub trait Chargeable {
    /// # Errors
    ///
    /// Fails if already charging or the battery is full.
    fn start_charging(&mut self) -> Result<(), VehicleError>;

    /// # Errors
    ///
    /// Fails if not charging.
    fn stop_charging(&mut self) -> Result<(), VehicleError>;

    /// Charge level in percent.
    fn battery_level(&self) -> u8;
}

impl Chargeable for Battery {
    fn start_charging(&mut self) -> Result<(), VehicleError> {
        if self.level >= Self::FULL {
            return Err(VehicleError::BatteryFull);
        }
        if self.charging {
            return Err(VehicleError::AlreadyCharging);
        }
        self.charging = true;
        Ok(())
    }

    fn stop_charging(&mut self) -> Result<(), VehicleError> {
        if !self.charging {
            return Err(VehicleError::NotCharging);
        }
        self.charging = false;
        Ok(())
    }

    fn battery_level(&self) -> u8 {
        self.level
    }
}

/// A car or motorcycle built from components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    make: String,
    model: String,
    year: u16,
    body: Body,
    powertrain: Powertrain,
    wheels: Wheels,
    gps: Option<Gps>,
    audio: Option<AudioSystem>,
    climate: Option<ClimateControl>,
    speed: u32,
    eco_mode: bool,
}

impl Vehicle {
    #[must_use]
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        body: Body,
        powertrain: Powertrain,
        wheels: Wheels,
        gps: Option<Gps>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            body,
            powertrain,
            wheels,
            gps,
            audio: None,
            climate: None,
            speed: 0,
            eco_mode: false,
        }
    }

    #[must_use]
    pub fn with_audio(mut self, audio: AudioSystem) -> Self {
        self.audio = Some(audio);
        self
    }

    #[must_use]
    pub fn with_climate(mut self, climate: ClimateControl) -> Self {
        self.climate = Some(climate);
        self
    }

    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub const fn body(&self) -> Body {
        self.body
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine {
        self.powertrain.engine()
    }

    #[must_use]
    pub const fn powertrain(&self) -> &Powertrain {
        &self.powertrain
    }

    #[must_use]
    pub const fn wheels(&self) -> &Wheels {
        &self.wheels
    }

    pub const fn wheels_mut(&mut self) -> &mut Wheels {
        &mut self.wheels
    }

    #[must_use]
    pub const fn gps(&self) -> Option<&Gps> {
        self.gps.as_ref()
    }

    #[must_use]
    pub const fn audio(&self) -> Option<&AudioSystem> {
        self.audio.as_ref()
    }

    #[must_use]
    pub const fn climate(&self) -> Option<&ClimateControl> {
        self.climate.as_ref()
    }

    #[must_use]
    pub const fn is_electric(&self) -> bool {
        matches!(self.powertrain, Powertrain::Electric { .. })
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.powertrain.engine().is_running()
    }

    #[must_use]
    pub const fn eco_mode(&self) -> bool {
        self.eco_mode
    }

    /// Flip eco mode, returning the new setting. Eco mode trims every
    /// acceleration to 80 percent.
    pub const fn toggle_eco_mode(&mut self) -> bool {
        self.eco_mode = !self.eco_mode;
        self.eco_mode
    }

    /// The battery, for electric vehicles.
    pub fn as_chargeable(&mut self) -> Option<&mut dyn Chargeable> {
        match &mut self.powertrain {
            Powertrain::Electric { battery, .. } => Some(battery),
            Powertrain::Combustion(_) => None,
        }
    }

    /// Switch on the GPS and set a destination.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::NoGps` if none is fitted.
    pub fn navigate_to(&mut self, destination: &str) -> Result<String, VehicleError> {
        let gps = self.gps.as_mut().ok_or(VehicleError::NoGps)?;
        gps.turn_on();
        gps.set_destination(destination)?;
        Ok(gps.directions().unwrap_or_default())
    }

    /// Start the engine and switch on every fitted extra, one line per step.
    pub fn start_luxury_experience(&mut self) -> Vec<String> {
        let engine = self.engine();
        let mut actions = vec![if self.is_running() {
            "Engine already running".to_owned()
        } else {
            format!("{}HP {} engine started", engine.horsepower(), engine.fuel())
        }];
        self.start();
        if let Some(gps) = &mut self.gps {
            gps.turn_on();
            actions.push("GPS activated".to_owned());
        }
        if let Some(audio) = &mut self.audio {
            actions.push(audio.turn_on());
        }
        if let Some(climate) = &mut self.climate {
            actions.push(climate.turn_on());
        }
        actions.push("Luxury experience activated".to_owned());
        actions
    }

    /// Apply cabin temperature and volume to whichever extras are fitted.
    ///
    /// # Errors
    ///
    /// Returns `VehicleError::ClimateOff` or `VehicleError::AudioOff` if a
    /// fitted unit is switched off. Settings applied before the failure stay.
    pub fn set_comfort(&mut self, temperature_f: u32, volume: u32) -> Result<Vec<String>, VehicleError> {
        let mut settings = Vec::new();
        if let Some(climate) = &mut self.climate {
            let applied = climate.set_temperature(temperature_f)?;
            settings.push(format!("Temperature set to {applied}°F"));
        }
        if let Some(audio) = &mut self.audio {
            let applied = audio.set_volume(volume)?;
            settings.push(format!("Volume set to {applied}"));
        }
        Ok(settings)
    }

    /// Multi-line status report.
    #[must_use]
    pub fn status(&self) -> String {
        let mut lines = vec![self.to_string(), self.engine().status()];
        if let Powertrain::Electric { battery, .. } = &self.powertrain {
            lines.push(battery.status());
        }
        lines.push(self.wheels.check_pressure());
        if self.gps.as_ref().is_some_and(Gps::is_on) {
            lines.push("GPS: Active".to_owned());
        }
        lines.push(format!("Speed: {} mph", self.speed));
        lines.join("\n")
    }
}

impl Drivable for Vehicle {
    fn start(&mut self) -> bool {
        let started = self.powertrain.engine_mut().start();
        if started {
            tracing::debug!(make = %self.make, model = %self.model, "Vehicle started");
        }
        started
    }

    fn stop(&mut self) -> bool {
        let stopped = self.powertrain.engine_mut().stop();
        if stopped {
            self.speed = 0;
        }
        stopped
    }

    fn accelerate(&mut self, increase: u32) -> Result<u32, VehicleError> {
        if !self.is_running() {
            return Err(VehicleError::NotRunning);
        }
        if let Powertrain::Electric { battery, .. } = &mut self.powertrain {
            let needed = u8::try_from(increase / 10).unwrap_or(u8::MAX);
            if !battery.drain(needed) {
                return Err(VehicleError::InsufficientBattery {
                    needed,
                    level: battery.battery_level(),
                });
            }
        }
        let gain = if self.eco_mode {
            increase.saturating_mul(4) / 5
        } else {
            increase
        };
        self.speed = self.speed.saturating_add(gain);
        Ok(self.speed)
    }

    fn brake(&mut self, decrease: u32) -> u32 {
        if self.speed == 0 {
            return 0;
        }
        self.speed = self.speed.saturating_sub(decrease);
        if let Powertrain::Electric { battery, .. } = &mut self.powertrain {
            let regen = u8::try_from(decrease / 5).unwrap_or(u8::MAX);
            let recovered = battery.recover(regen);
            if recovered > 0 {
                tracing::debug!(recovered, level = battery.battery_level(), "Regenerative braking");
            }
        }
        self.speed
    }

    fn speed(&self) -> u32 {
        self.speed
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.body {
            Body::Car { .. } if self.is_electric() => "Electric Car",
            Body::Car { .. } => "Car",
            Body::Motorcycle { .. } => "Motorcycle",
        };
        write!(f, "{kind}: {} {} {}", self.year, self.make, self.model)
    }
}

/// Ready-made configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleFactory;

impl VehicleFactory {
    /// 120 HP regular engine on 15" standard wheels, no GPS.
    #[must_use]
    pub fn economy_car(make: &str, model: &str, year: u16) -> Vehicle {
        Vehicle::new(
            make,
            model,
            year,
            Body::Car { doors: 4 },
            Powertrain::Combustion(Engine::new(120, FuelType::Regular)),
            Wheels::new(4, 15, WheelKind::Standard),
            None,
        )
    }

    /// 400 HP premium engine on 19" performance wheels, with GPS.
    #[must_use]
    pub fn sport_car(make: &str, model: &str, year: u16) -> Vehicle {
        Vehicle::new(
            make,
            model,
            year,
            Body::Car { doors: 2 },
            Powertrain::Combustion(Engine::new(400, FuelType::Premium)),
            Wheels::new(4, 19, WheelKind::Performance),
            Some(Gps::default()),
        )
    }

    /// 300 HP motor with a 100 kWh fast-charging battery on 18" low rolling
    /// resistance wheels, with GPS.
    #[must_use]
    pub fn electric_car(make: &str, model: &str, year: u16) -> Vehicle {
        Vehicle::new(
            make,
            model,
            year,
            Body::Car { doors: 4 },
            Powertrain::Electric {
                motor: Engine::new(300, FuelType::Electric),
                battery: Battery::new(100, ChargingSpeed::Fast),
            },
            Wheels::new(4, 18, WheelKind::LowRollingResistance),
            Some(Gps::default()),
        )
    }

    /// Premium engine on 20" performance wheels with GPS, a 1000 W Bose
    /// audio system, and climate control.
    #[must_use]
    pub fn luxury_car(make: &str, model: &str, year: u16, horsepower: u32) -> Vehicle {
        Vehicle::new(
            make,
            model,
            year,
            Body::Car { doors: 4 },
            Powertrain::Combustion(Engine::new(horsepower, FuelType::Premium)),
            Wheels::new(4, 20, WheelKind::Performance),
            Some(Gps::default()),
        )
        .with_audio(AudioSystem::new("Bose", 1000))
        .with_climate(ClimateControl::default())
    }

    /// A gasoline motorcycle on two 18" sport wheels.
    #[must_use]
    pub fn motorcycle(make: &str, model: &str, year: u16, engine_cc: u32, horsepower: u32) -> Vehicle {
        Vehicle::new(
            make,
            model,
            year,
            Body::Motorcycle { engine_cc },
            Powertrain::Combustion(Engine::new(horsepower, FuelType::Gasoline)),
            Wheels::new(2, 18, WheelKind::Sport),
            None,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_start_stop_idempotent() {
        let mut engine = Engine::new(200, FuelType::Gasoline);
        assert!(engine.start());
        assert!(!engine.start());
        assert_eq!(engine.status(), "Engine: Running, Temp: 180°F");
        assert!(engine.stop());
        assert!(!engine.stop());
        assert_eq!(engine.status(), "Engine: Stopped, Temp: 70°F");
    }

    #[test]
    fn test_wheels_inflate_capped() {
        let mut wheels = Wheels::new(4, 17, WheelKind::AllSeason);
        assert_eq!(wheels.inflate(10), 42);
        assert_eq!(wheels.inflate(10), Wheels::MAX_PSI);
        assert_eq!(wheels.check_pressure(), "4 17\" All-Season wheels at 50 PSI");
    }

    #[test]
    fn test_gps_needs_power() {
        let mut gps = Gps::default();
        assert_eq!(gps.set_destination("Downtown"), Err(VehicleError::GpsOff));
        assert_eq!(gps.directions(), None);
        gps.turn_on();
        gps.set_destination("Downtown").unwrap();
        assert_eq!(
            gps.directions().as_deref(),
            Some("Navigate from Current Location to Downtown")
        );
    }

    #[test]
    fn test_accelerate_requires_running() {
        let mut car = VehicleFactory::economy_car("Nissan", "Versa", 2023);
        let err = car.accelerate(30).unwrap_err();
        assert_eq!(err, VehicleError::NotRunning);
        assert_eq!(err.kind(), ErrorKind::State);

        car.start();
        assert_eq!(car.accelerate(30).unwrap(), 30);
        assert_eq!(car.brake(50), 0);
    }

    #[test]
    fn test_stop_resets_speed() {
        let mut car = VehicleFactory::sport_car("Porsche", "911", 2023);
        car.start();
        car.accelerate(60).unwrap();
        assert!(car.stop());
        assert_eq!(car.speed(), 0);
    }

    #[test]
    fn test_electric_acceleration_uses_battery() {
        let mut tesla = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
        tesla.start();
        assert_eq!(tesla.accelerate(50).unwrap(), 50);
        assert_eq!(tesla.as_chargeable().unwrap().battery_level(), 95);
    }

    #[test]
    fn test_eco_mode_trims_acceleration() {
        let mut tesla = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
        tesla.start();
        assert!(tesla.toggle_eco_mode());
        assert_eq!(tesla.accelerate(30).unwrap(), 24);
        assert_eq!(tesla.as_chargeable().unwrap().battery_level(), 97);
    }

    #[test]
    fn test_regenerative_braking_caps_at_full() {
        let mut tesla = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
        tesla.start();
        tesla.accelerate(50).unwrap();
        tesla.accelerate(30).unwrap();
        assert_eq!(tesla.as_chargeable().unwrap().battery_level(), 92);

        assert_eq!(tesla.brake(20), 60);
        assert_eq!(tesla.as_chargeable().unwrap().battery_level(), 96);
        tesla.brake(40);
        assert_eq!(tesla.as_chargeable().unwrap().battery_level(), 100);
    }

    #[test]
    fn test_battery_shortfall() {
        let mut battery = Battery::new(60, ChargingSpeed::Standard);
        assert!(battery.drain(95));
        assert!(!battery.drain(10));
        assert_eq!(battery.battery_level(), 5);

        let mut car = Vehicle::new(
            "Nissan",
            "Leaf",
            2023,
            Body::Car { doors: 4 },
            Powertrain::Electric {
                motor: Engine::new(150, FuelType::Electric),
                battery,
            },
            Wheels::new(4, 16, WheelKind::Standard),
            None,
        );
        car.start();
        assert_eq!(
            car.accelerate(100),
            Err(VehicleError::InsufficientBattery { needed: 10, level: 5 })
        );
        assert_eq!(car.speed(), 0);
    }

    #[test]
    fn test_charging() {
        let mut tesla = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
        let battery = tesla.as_chargeable().unwrap();
        assert_eq!(battery.start_charging(), Err(VehicleError::BatteryFull));

        tesla.start();
        tesla.accelerate(50).unwrap();
        let battery = tesla.as_chargeable().unwrap();
        battery.start_charging().unwrap();
        assert_eq!(battery.start_charging(), Err(VehicleError::AlreadyCharging));
        battery.stop_charging().unwrap();
        assert_eq!(battery.stop_charging(), Err(VehicleError::NotCharging));
    }

    #[test]
    fn test_combustion_is_not_chargeable() {
        let mut bike = VehicleFactory::motorcycle("Yamaha", "R1", 2023, 998, 200);
        assert!(bike.as_chargeable().is_none());
        assert_eq!(bike.wheels().count(), 2);
        assert_eq!(bike.to_string(), "Motorcycle: 2023 Yamaha R1");
    }

    #[test]
    fn test_factory_configurations() {
        let economy = VehicleFactory::economy_car("Nissan", "Versa", 2023);
        assert_eq!(economy.engine().horsepower(), 120);
        assert_eq!(economy.engine().fuel(), FuelType::Regular);
        assert!(economy.gps().is_none());

        let sport = VehicleFactory::sport_car("Porsche", "911", 2023);
        assert_eq!(sport.engine().horsepower(), 400);
        assert_eq!(sport.wheels().kind(), WheelKind::Performance);
        assert!(sport.gps().is_some());

        let electric = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
        assert!(electric.is_electric());
        assert_eq!(electric.wheels().size_in(), 18);
        assert_eq!(electric.to_string(), "Electric Car: 2023 Tesla Model 3");
    }

    #[test]
    fn test_navigation() {
        let mut economy = VehicleFactory::economy_car("Nissan", "Versa", 2023);
        assert_eq!(economy.navigate_to("Downtown"), Err(VehicleError::NoGps));

        let mut sport = VehicleFactory::sport_car("Porsche", "911", 2023);
        assert_eq!(
            sport.navigate_to("Downtown").unwrap(),
            "Navigate from Current Location to Downtown"
        );
        assert!(sport.status().contains("GPS: Active"));
    }

    #[test]
    fn test_cabin_components_need_power() {
        let mut audio = AudioSystem::new("Bose", 1000);
        assert_eq!(audio.set_volume(30), Err(VehicleError::AudioOff));
        assert_eq!(audio.turn_on(), "Bose audio system on");
        assert_eq!(audio.set_volume(250).unwrap(), 100);

        let mut climate = ClimateControl::default();
        assert_eq!(climate.set_temperature(70), Err(VehicleError::ClimateOff));
        climate.turn_on();
        assert_eq!(climate.set_temperature(40).unwrap(), 60);
        assert_eq!(climate.set_temperature(90).unwrap(), 85);
        assert_eq!(climate.mode(), "Auto");
    }

    #[test]
    fn test_luxury_experience() {
        let mut car = VehicleFactory::luxury_car("BMW", "7 Series", 2023, 300);
        assert_eq!(car.wheels().size_in(), 20);
        assert_eq!(car.audio().map(AudioSystem::watts), Some(1000));
        assert_eq!(car.set_comfort(75, 25), Err(VehicleError::ClimateOff));

        assert_eq!(
            car.start_luxury_experience(),
            [
                "300HP Premium engine started",
                "GPS activated",
                "Bose audio system on",
                "Climate control activated",
                "Luxury experience activated"
            ]
        );
        assert!(car.is_running());
        assert_eq!(
            car.set_comfort(75, 25).unwrap(),
            ["Temperature set to 75°F", "Volume set to 25"]
        );
        assert_eq!(car.climate().map(ClimateControl::temperature_f), Some(75));
        assert_eq!(car.start_luxury_experience().first().map(String::as_str), Some("Engine already running"));

        let mut plain = VehicleFactory::economy_car("Nissan", "Versa", 2023);
        assert!(plain.set_comfort(75, 25).unwrap().is_empty());
    }
}
