// tse-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Mass as UomMass, Power as UomPower, Pressure as UomPressure,
    Ratio as UomRatio, ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64). Quantities the formulas in
// spec.md express directly in degrees Celsius (pot/room temperature)
// are NOT wrapped here: they stay plain `f64` at the API boundary and
// are converted to Kelvin only where a formula needs it (ideal gas law,
// ebullioscopic constant).
pub type Energy = UomEnergy;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn joules(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn cubic_meters(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn seconds(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn kelvin(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

/// Celsius offset to Kelvin, per spec.md's "all temperatures are in
/// degrees Celsius" data model convention.
pub const CELSIUS_TO_KELVIN_OFFSET: f64 = 273.15;

#[inline]
pub fn c_to_k(celsius: f64) -> f64 {
    celsius + CELSIUS_TO_KELVIN_OFFSET
}

#[inline]
pub fn k_to_c(kelvin: f64) -> f64 {
    kelvin - CELSIUS_TO_KELVIN_OFFSET
}
