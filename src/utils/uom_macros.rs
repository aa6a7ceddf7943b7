#![warn(missing_docs)]
//! Module for additional uom macros that facilitate the creation of single unit values or vectors of them
/// helper macro to create the units
#[macro_export]
macro_rules! uom_unit_creator {
    ($unit:ident, $unit_type:ident, $val1:expr) => {
        $unit_type::new::<$unit>($val1)
    };
    ($unit:ident, $unit_type:ident, $( $x:expr ),*) => {
        {
            use std::vec::Vec;
            let mut temp_vec = Vec::new();
            $(
                temp_vec.push($unit_type::new::<$unit>($x));
            )*
            temp_vec
        }
    };
}

///macro to create a Length in meter
#[macro_export]
macro_rules! meter {
    ($( $x:expr ),*) =>{
        {
            use uom::si::{f64::Length, length::meter};
            $crate::uom_unit_creator![meter, Length, $( $x ),*]
        }
    };
}
///macro to create a Length in centimeter
#[macro_export]
macro_rules! centimeter {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::centimeter};
        $crate::uom_unit_creator![centimeter, Length, $( $x ),*]
    }};
}
///macro to create a Length in millimeter
#[macro_export]
macro_rules! millimeter {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::millimeter};
        $crate::uom_unit_creator![millimeter, Length, $( $x ),*]
    }};
}
///macro to create a Length in micrometer
#[macro_export]
macro_rules! micrometer {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::micrometer};
        $crate::uom_unit_creator![micrometer, Length, $( $x ),*]
    }};
}
///macro to create a Length in nanometer
#[macro_export]
macro_rules! nanometer {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Length, length::nanometer};
        $crate::uom_unit_creator![nanometer, Length, $( $x ),*]
    }};
}
///macro to create a Power in watt
#[macro_export]
macro_rules! watt {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Power, power::watt};
        $crate::uom_unit_creator![watt, Power, $( $x ),*]
    }};
}
///macro to create a Power in milliwatt
#[macro_export]
macro_rules! milliwatt {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Power, power::milliwatt};
        $crate::uom_unit_creator![milliwatt, Power, $( $x ),*]
    }};
}
///macro to create an Angle in radian
#[macro_export]
macro_rules! radian {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Angle, angle::radian};
        $crate::uom_unit_creator![radian, Angle, $( $x ),*]
    }};
}
///macro to create an Angle in degree
#[macro_export]
macro_rules! degree {
    ($( $x:expr ),*) =>{{
        use uom::si::{f64::Angle, angle::degree};
        $crate::uom_unit_creator![degree, Angle, $( $x ),*]
    }};
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use uom::si::{angle::radian, length::meter, power::watt};
    #[test]
    fn single_values() {
        assert_relative_eq!(centimeter!(2.0).get::<meter>(), 0.02);
        assert_relative_eq!(millimeter!(2.0).get::<meter>(), 0.002);
        assert_relative_eq!(micrometer!(2.0).get::<meter>(), 2.0e-6);
        assert_relative_eq!(nanometer!(850.0).get::<meter>(), 850.0e-9);
        assert_relative_eq!(milliwatt!(1.5).get::<watt>(), 1.5e-3);
        assert_relative_eq!(watt!(1.5).get::<watt>(), 1.5);
        assert_relative_eq!(
            degree!(180.0).get::<radian>(),
            std::f64::consts::PI,
            max_relative = 1e-12
        );
        assert_relative_eq!(radian!(0.5).get::<radian>(), 0.5);
    }
    #[test]
    fn vectors() {
        let lengths = meter!(0.1, 0.2, 0.3);
        assert_eq!(lengths.len(), 3);
        assert_relative_eq!(lengths[2].get::<meter>(), 0.3);
    }
}
