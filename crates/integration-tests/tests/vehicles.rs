//! Factory-built vehicles driven through the capability traits.

use bazaar_core::vehicle::{Chargeable, Drivable, Vehicle, VehicleError, VehicleFactory};
use bazaar_core::{Error, ErrorKind};

fn test_drive(vehicle: &mut dyn Drivable) -> Result<u32, VehicleError> {
    vehicle.start();
    vehicle.accelerate(30)?;
    Ok(vehicle.brake(10))
}

#[test]
fn every_factory_build_can_be_driven() {
    let mut fleet: Vec<Vehicle> = vec![
        VehicleFactory::economy_car("Toyota", "Corolla", 2024),
        VehicleFactory::sport_car("Porsche", "911", 2024),
        VehicleFactory::electric_car("Tesla", "Model 3", 2024),
        VehicleFactory::motorcycle("Harley-Davidson", "Street 750", 2024, 750, 60),
    ];
    for vehicle in &mut fleet {
        assert_eq!(test_drive(vehicle).expect("drive"), 20);
        assert!(vehicle.status().contains("Speed: 20 mph"));
    }
}

#[test]
fn only_electric_vehicles_expose_a_battery() {
    let mut economy = VehicleFactory::economy_car("Toyota", "Corolla", 2024);
    let mut electric = VehicleFactory::electric_car("Tesla", "Model 3", 2024);
    assert!(economy.as_chargeable().is_none());
    assert_eq!(
        electric.as_chargeable().map(|b| b.battery_level()),
        Some(100)
    );
    assert_eq!(electric.to_string(), "Electric Car: 2024 Tesla Model 3");
}

#[test]
fn driving_drains_and_braking_recovers_charge() {
    let mut car = VehicleFactory::electric_car("Tesla", "Model 3", 2024);
    car.start();
    car.accelerate(50).expect("accelerate");
    let level = |car: &mut Vehicle| car.as_chargeable().map(|b| b.battery_level());
    assert_eq!(level(&mut car), Some(95));

    car.brake(20);
    assert_eq!(level(&mut car), Some(99));

    let battery = car.as_chargeable().expect("battery");
    battery.start_charging().expect("charge");
    assert_eq!(battery.start_charging(), Err(VehicleError::AlreadyCharging));
    battery.stop_charging().expect("stop");
}

#[test]
fn stopped_vehicle_cannot_accelerate() {
    let mut bike = VehicleFactory::motorcycle("Honda", "CBR", 2023, 600, 100);
    let err: Error = bike.accelerate(10).expect_err("not running").into();
    assert_eq!(err.kind(), ErrorKind::State);

    bike.start();
    bike.accelerate(40).expect("accelerate");
    bike.stop();
    assert_eq!(bike.speed(), 0);
}

#[test]
fn navigation_needs_a_gps_unit() {
    let mut sport = VehicleFactory::sport_car("Porsche", "911", 2024);
    let directions = sport.navigate_to("Downtown").expect("navigate");
    assert!(directions.contains("Downtown"));
    assert!(sport.status().contains("GPS: Active"));

    let mut economy = VehicleFactory::economy_car("Toyota", "Corolla", 2024);
    assert_eq!(economy.navigate_to("Downtown"), Err(VehicleError::NoGps));
}
