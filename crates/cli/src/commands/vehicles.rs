//! Vehicle walkthrough: components, factory builds, electric driving, and a
//! luxury car with cabin extras.

use std::io::Write;

use bazaar_core::vehicle::{Chargeable, Drivable, Engine, FuelType, Vehicle, VehicleFactory};

use super::{DemoResult, heading};

/// Run the vehicle walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails or a step the walkthrough expects to
/// succeed does not.
pub fn run(out: &mut impl Write) -> DemoResult {
    heading(out, "1. COMPONENTS")?;
    let mut engine = Engine::new(200, FuelType::Gasoline);
    engine.start();
    writeln!(out, "  {}", engine.status())?;
    writeln!(out, "  Second start changed anything: {}", engine.start())?;

    heading(out, "2. FACTORY CONFIGURATIONS")?;
    let mut fleet = [
        ("Economy", VehicleFactory::economy_car("Nissan", "Versa", 2023)),
        ("Sport", VehicleFactory::sport_car("Porsche", "911", 2023)),
        ("Electric", VehicleFactory::electric_car("Tesla", "Model 3", 2023)),
        (
            "Motorcycle",
            VehicleFactory::motorcycle("Yamaha", "R1", 2023, 998, 200),
        ),
    ];
    for (label, vehicle) in &fleet {
        writeln!(out, "{label}: {vehicle}")?;
        writeln!(
            out,
            "  Engine: {}HP {}",
            vehicle.engine().horsepower(),
            vehicle.engine().fuel()
        )?;
        writeln!(out, "  Wheels: {}", vehicle.wheels().check_pressure())?;
        writeln!(
            out,
            "  GPS: {}",
            if vehicle.gps().is_some() { "Yes" } else { "No" }
        )?;
    }

    heading(out, "3. DRIVING")?;
    for (label, vehicle) in &mut fleet {
        if let Err(e) = vehicle.accelerate(20) {
            writeln!(out, "  {label} before start: {e}")?;
        }
        vehicle.start();
        let speed = vehicle.accelerate(40)?;
        writeln!(out, "  {label} accelerates to {speed} mph")?;
        match vehicle.navigate_to("Downtown") {
            Ok(route) => writeln!(out, "  {label}: {route}")?,
            Err(e) => writeln!(out, "  {label}: {e}")?,
        }
    }

    heading(out, "4. ELECTRIC")?;
    let mut tesla = VehicleFactory::electric_car("Tesla", "Model 3", 2023);
    drive_electric(out, &mut tesla)?;
    writeln!(out, "{}", tesla.status())?;

    heading(out, "5. LUXURY EXTRAS")?;
    let mut bmw = VehicleFactory::luxury_car("BMW", "7 Series", 2023, 300);
    for action in bmw.start_luxury_experience() {
        writeln!(out, "  {action}")?;
    }
    for setting in bmw.set_comfort(75, 25)? {
        writeln!(out, "  {setting}")?;
    }

    Ok(())
}

fn drive_electric(out: &mut impl Write, car: &mut Vehicle) -> DemoResult {
    car.start();
    car.toggle_eco_mode();
    let speed = car.accelerate(50)?;
    writeln!(out, "  Eco acceleration to {speed} mph ({}%)", level(car))?;
    car.toggle_eco_mode();
    let speed = car.accelerate(30)?;
    writeln!(out, "  Acceleration to {speed} mph ({}%)", level(car))?;
    let speed = car.brake(20);
    writeln!(out, "  Regenerative braking to {speed} mph ({}%)", level(car))?;

    if let Some(battery) = car.as_chargeable() {
        battery.start_charging()?;
        writeln!(out, "  Charging started at {}%", battery.battery_level())?;
        battery.stop_charging()?;
    }
    Ok(())
}

fn level(car: &mut Vehicle) -> u8 {
    car.as_chargeable().map_or(0, |battery| battery.battery_level())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough() {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Engine: Running, Temp: 180°F"));
        assert!(text.contains("Second start changed anything: false"));
        assert!(text.contains("Economy: Car: 2023 Nissan Versa"));
        assert!(text.contains("4 18\" Low Rolling Resistance wheels at 32 PSI"));
        assert!(text.contains("Economy before start: cannot accelerate"));
        assert!(text.contains("Economy: no GPS system installed"));
        assert!(text.contains("Sport: Navigate from Current Location to Downtown"));
        assert!(text.contains("Eco acceleration to 40 mph (95%)"));
        assert!(text.contains("Acceleration to 70 mph (92%)"));
        assert!(text.contains("Regenerative braking to 50 mph (96%)"));
        assert!(text.contains("Charging started at 96%"));
        assert!(text.contains("  300HP Premium engine started\n  GPS activated\n  Bose audio system on"));
        assert!(text.contains("  Temperature set to 75°F\n  Volume set to 25\n"));
    }
}
