//! Built-in analytic ephemeris.
//!
//! Arcminute-class positions from closed-form theories, good enough for
//! sign/house/aspect work but not for occultation timing:
//!
//! - Planets Mercury–Pluto: heliocentric Keplerian mean elements at J2000
//!   with centennial rates (the standard JPL approximate-position table),
//!   Kepler's equation solved by Newton iteration, geocentric vectors by
//!   subtracting the Earth–Moon barycenter position.
//! - Sun: mean longitude plus equation of center.
//! - Moon: mean longitude plus the principal elliptic term.
//! - Sidereal time: the usual GMST polynomial.
//!
//! Topocentric parallax is neglected in the equatorial transform; the
//! observer argument selects nothing today but stays in the contract so a
//! higher-fidelity provider can honor it.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{
    EclipticVector, EphemerisError, EphemerisProvider, EphemerisResult, EquatorialCoordinates,
    Observer,
};
use crate::angles::{normalize_degrees, normalize_hours};
use crate::models::{Body, JulianDate};

/// Kilometres per astronomical unit.
const KM_PER_AU: f64 = 149_597_870.7;

/// Keplerian mean elements at J2000.0 with per-Julian-century rates.
///
/// Angles in degrees, semi-major axis in AU.
#[derive(Debug, Clone, Copy)]
struct KeplerElements {
    a: f64,
    e: f64,
    incl: f64,
    mean_longitude: f64,
    longitude_perihelion: f64,
    longitude_node: f64,
    a_rate: f64,
    e_rate: f64,
    incl_rate: f64,
    mean_longitude_rate: f64,
    longitude_perihelion_rate: f64,
    longitude_node_rate: f64,
}

/// Planets with heliocentric element sets. `EarthMoonBarycenter` is the
/// origin shift used to go heliocentric → geocentric.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum OrbitTarget {
    EarthMoonBarycenter,
    Planet(Body),
}

/// JPL approximate mean elements, valid 1800 AD – 2050 AD.
static ELEMENTS: Lazy<HashMap<OrbitTarget, KeplerElements>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        OrbitTarget::Planet(Body::Mercury),
        KeplerElements {
            a: 0.387_099_27,
            e: 0.205_635_93,
            incl: 7.004_979_02,
            mean_longitude: 252.250_323_50,
            longitude_perihelion: 77.457_796_28,
            longitude_node: 48.330_765_93,
            a_rate: 0.000_000_37,
            e_rate: 0.000_019_06,
            incl_rate: -0.005_947_49,
            mean_longitude_rate: 149_472.674_111_75,
            longitude_perihelion_rate: 0.160_476_89,
            longitude_node_rate: -0.125_340_81,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Venus),
        KeplerElements {
            a: 0.723_335_66,
            e: 0.006_776_72,
            incl: 3.394_676_05,
            mean_longitude: 181.979_099_50,
            longitude_perihelion: 131.602_467_18,
            longitude_node: 76.679_842_55,
            a_rate: 0.000_003_90,
            e_rate: -0.000_041_07,
            incl_rate: -0.000_788_90,
            mean_longitude_rate: 58_517.815_387_29,
            longitude_perihelion_rate: 0.002_683_29,
            longitude_node_rate: -0.277_694_18,
        },
    );
    table.insert(
        OrbitTarget::EarthMoonBarycenter,
        KeplerElements {
            a: 1.000_002_61,
            e: 0.016_711_23,
            incl: -0.000_015_31,
            mean_longitude: 100.464_571_66,
            longitude_perihelion: 102.937_681_93,
            longitude_node: 0.0,
            a_rate: 0.000_005_62,
            e_rate: -0.000_043_92,
            incl_rate: -0.012_946_68,
            mean_longitude_rate: 35_999.372_449_81,
            longitude_perihelion_rate: 0.323_273_64,
            longitude_node_rate: 0.0,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Mars),
        KeplerElements {
            a: 1.523_710_34,
            e: 0.093_394_10,
            incl: 1.849_691_42,
            mean_longitude: -4.553_432_05,
            longitude_perihelion: -23.943_629_59,
            longitude_node: 49.559_538_91,
            a_rate: 0.000_018_47,
            e_rate: 0.000_078_82,
            incl_rate: -0.008_131_31,
            mean_longitude_rate: 19_140.302_684_99,
            longitude_perihelion_rate: 0.444_410_88,
            longitude_node_rate: -0.292_573_43,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Jupiter),
        KeplerElements {
            a: 5.202_887_00,
            e: 0.048_386_24,
            incl: 1.304_396_95,
            mean_longitude: 34.396_440_51,
            longitude_perihelion: 14.728_479_83,
            longitude_node: 100.473_909_09,
            a_rate: -0.000_116_07,
            e_rate: -0.000_132_53,
            incl_rate: -0.001_837_14,
            mean_longitude_rate: 3_034.746_127_75,
            longitude_perihelion_rate: 0.212_526_68,
            longitude_node_rate: 0.204_691_06,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Saturn),
        KeplerElements {
            a: 9.536_675_94,
            e: 0.053_861_79,
            incl: 2.485_991_87,
            mean_longitude: 49.954_244_23,
            longitude_perihelion: 92.598_878_31,
            longitude_node: 113.662_424_48,
            a_rate: -0.001_250_60,
            e_rate: -0.000_509_91,
            incl_rate: 0.001_936_09,
            mean_longitude_rate: 1_222.493_622_01,
            longitude_perihelion_rate: -0.418_972_16,
            longitude_node_rate: -0.288_677_94,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Uranus),
        KeplerElements {
            a: 19.189_164_64,
            e: 0.047_257_44,
            incl: 0.772_637_83,
            mean_longitude: 313.238_104_51,
            longitude_perihelion: 170.954_276_30,
            longitude_node: 74.016_925_03,
            a_rate: -0.001_961_76,
            e_rate: -0.000_043_97,
            incl_rate: -0.002_429_39,
            mean_longitude_rate: 428.482_027_85,
            longitude_perihelion_rate: 0.408_052_81,
            longitude_node_rate: 0.042_405_89,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Neptune),
        KeplerElements {
            a: 30.069_922_76,
            e: 0.008_590_48,
            incl: 1.770_043_47,
            mean_longitude: -55.120_029_69,
            longitude_perihelion: 44.964_762_27,
            longitude_node: 131.784_225_74,
            a_rate: 0.000_262_91,
            e_rate: 0.000_051_05,
            incl_rate: 0.000_353_72,
            mean_longitude_rate: 218.459_453_25,
            longitude_perihelion_rate: -0.322_414_64,
            longitude_node_rate: -0.005_086_64,
        },
    );
    table.insert(
        OrbitTarget::Planet(Body::Pluto),
        KeplerElements {
            a: 39.482_116_75,
            e: 0.248_827_30,
            incl: 17.140_012_06,
            mean_longitude: 238.929_038_33,
            longitude_perihelion: 224.068_916_29,
            longitude_node: 110.303_936_84,
            a_rate: -0.000_315_96,
            e_rate: 0.000_051_70,
            incl_rate: 0.000_048_18,
            mean_longitude_rate: 145.207_805_15,
            longitude_perihelion_rate: -0.040_629_42,
            longitude_node_rate: -0.011_834_82,
        },
    );
    table
});

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration.
///
/// `mean_anomaly` in radians; converges in a handful of steps for every
/// solar-system eccentricity (Pluto's 0.249 included).
pub(crate) fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut eccentric_anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..10 {
        let delta = (eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * eccentric_anomaly.cos());
        eccentric_anomaly -= delta;
        if delta.abs() < 1e-8 {
            break;
        }
    }
    eccentric_anomaly
}

/// Heliocentric ecliptic position of an orbit target, AU.
fn heliocentric_position(target: OrbitTarget, jd: JulianDate) -> EclipticVector {
    let el = ELEMENTS[&target];
    let t = jd.centuries_since_j2000();

    let a = el.a + el.a_rate * t;
    let e = el.e + el.e_rate * t;
    let incl = (el.incl + el.incl_rate * t).to_radians();
    let mean_longitude = el.mean_longitude + el.mean_longitude_rate * t;
    let longitude_perihelion = el.longitude_perihelion + el.longitude_perihelion_rate * t;
    let longitude_node = el.longitude_node + el.longitude_node_rate * t;

    let arg_perihelion = (longitude_perihelion - longitude_node).to_radians();
    let node = longitude_node.to_radians();
    let mean_anomaly =
        normalize_degrees(mean_longitude - longitude_perihelion).to_radians();

    let eccentric_anomaly = solve_kepler(mean_anomaly, e);

    // Position in the orbital plane, perihelion along +x.
    let x_orb = a * (eccentric_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * eccentric_anomaly.sin();

    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    EclipticVector::new(
        (cos_w * cos_o - sin_w * sin_o * cos_i) * x_orb
            + (-sin_w * cos_o - cos_w * sin_o * cos_i) * y_orb,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * x_orb
            + (-sin_w * sin_o + cos_w * cos_o * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    )
}

/// Low-precision solar theory: apparent longitude (degrees) and distance (AU).
fn solar_position(jd: JulianDate) -> (f64, f64) {
    let d = jd.days_since_j2000();
    let mean_longitude = 280.460 + 0.985_647_4 * d;
    let mean_anomaly = (357.528 + 0.985_600_3 * d).to_radians();

    let longitude = normalize_degrees(
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin(),
    );
    let distance =
        1.000_14 - 0.016_71 * mean_anomaly.cos() - 0.000_14 * (2.0 * mean_anomaly).cos();
    (longitude, distance)
}

/// Low-precision lunar theory: geocentric ecliptic vector, AU.
fn lunar_position(jd: JulianDate) -> EclipticVector {
    let d = jd.days_since_j2000();
    let mean_longitude = 218.316 + 13.176_396 * d;
    let mean_anomaly = (134.963 + 13.064_993 * d).to_radians();
    let mean_distance_arg = (93.272 + 13.229_350 * d).to_radians();

    let longitude =
        normalize_degrees(mean_longitude + 6.289 * mean_anomaly.sin()).to_radians();
    let latitude = (5.128 * mean_distance_arg.sin()).to_radians();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();
    let distance = distance_km / KM_PER_AU;

    let (sin_lat, cos_lat) = latitude.sin_cos();
    EclipticVector::new(
        distance * cos_lat * longitude.cos(),
        distance * cos_lat * longitude.sin(),
        distance * sin_lat,
    )
}

/// Greenwich mean sidereal time in degrees.
fn gmst_degrees(jd: JulianDate) -> f64 {
    let d = jd.days_since_j2000();
    let t = jd.centuries_since_j2000();
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// The built-in analytic ephemeris provider.
///
/// Stateless and pure: every method is a function of its arguments only.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }

    fn vector_of(&self, body: Body, jd: JulianDate) -> EphemerisResult<EclipticVector> {
        if !jd.value().is_finite() {
            return Err(EphemerisError::new("non-finite Julian date"));
        }
        match body {
            Body::Sun => {
                let (longitude, distance) = solar_position(jd);
                let lon = longitude.to_radians();
                Ok(EclipticVector::new(
                    distance * lon.cos(),
                    distance * lon.sin(),
                    0.0,
                ))
            }
            Body::Moon => Ok(lunar_position(jd)),
            planet => {
                let helio = heliocentric_position(OrbitTarget::Planet(planet), jd);
                let earth = heliocentric_position(OrbitTarget::EarthMoonBarycenter, jd);
                Ok(EclipticVector::new(
                    helio.x - earth.x,
                    helio.y - earth.y,
                    helio.z - earth.z,
                ))
            }
        }
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn solar_longitude(&self, jd: JulianDate) -> EphemerisResult<f64> {
        if !jd.value().is_finite() {
            return Err(EphemerisError::new("non-finite Julian date"));
        }
        Ok(solar_position(jd).0)
    }

    fn geocentric_vector(&self, body: Body, jd: JulianDate) -> EphemerisResult<EclipticVector> {
        self.vector_of(body, jd)
    }

    fn equatorial(
        &self,
        body: Body,
        jd: JulianDate,
        _observer: &Observer,
    ) -> EphemerisResult<EquatorialCoordinates> {
        let v = self.vector_of(body, jd)?;
        let r = v.magnitude();
        if r == 0.0 {
            return Err(EphemerisError::new("degenerate geocentric vector"));
        }

        // Rotate ecliptic → equatorial about the +x (equinox) axis.
        let obliquity = jd.mean_obliquity().to_radians();
        let (sin_e, cos_e) = obliquity.sin_cos();
        let x_eq = v.x;
        let y_eq = v.y * cos_e - v.z * sin_e;
        let z_eq = v.y * sin_e + v.z * cos_e;

        let right_ascension = normalize_hours(y_eq.atan2(x_eq).to_degrees() / 15.0);
        let declination = (z_eq / r).asin().to_degrees();

        Ok(EquatorialCoordinates {
            right_ascension,
            declination,
        })
    }

    fn sidereal_time(&self, jd: JulianDate) -> EphemerisResult<f64> {
        if !jd.value().is_finite() {
            return Err(EphemerisError::new("non-finite Julian date"));
        }
        Ok(normalize_hours(gmst_degrees(jd) / 15.0))
    }

    fn supports(&self, _body: Body) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::ecliptic_longitude;
    use crate::models::time::J2000;

    const EPH: AnalyticEphemeris = AnalyticEphemeris;

    #[test]
    fn test_solar_longitude_at_j2000() {
        // Sun was near 280.3° (10° Capricorn) at the J2000 epoch.
        let lon = EPH.solar_longitude(J2000).unwrap();
        assert!((lon - 280.3).abs() < 0.5, "solar longitude {}", lon);
    }

    #[test]
    fn test_solar_longitude_at_march_equinox() {
        // 2000-03-20 07:35 UTC, JD ≈ 2451623.816
        let lon = EPH.solar_longitude(JulianDate::new(2_451_623.816)).unwrap();
        let off_equinox = lon.min(360.0 - lon);
        assert!(off_equinox < 0.5, "equinox longitude {}", lon);
    }

    #[test]
    fn test_mars_position_class_at_j2000() {
        // Mars stood near 327.9° (Aquarius) at J2000; the mean-element
        // model should land within the arcminute class.
        let v = EPH.geocentric_vector(Body::Mars, J2000).unwrap();
        let lon = ecliptic_longitude(&v);
        assert!((lon - 327.9).abs() < 1.5, "mars longitude {}", lon);
    }

    #[test]
    fn test_jupiter_distance_plausible() {
        // Geocentric Jupiter distance oscillates between roughly 4 and 6.5 AU.
        let v = EPH.geocentric_vector(Body::Jupiter, J2000).unwrap();
        let d = v.magnitude();
        assert!((3.9..=6.5).contains(&d), "jupiter distance {}", d);
    }

    #[test]
    fn test_moon_distance_plausible() {
        let v = EPH.geocentric_vector(Body::Moon, J2000).unwrap();
        let d_km = v.magnitude() * KM_PER_AU;
        assert!(
            (356_000.0..=407_000.0).contains(&d_km),
            "moon distance {} km",
            d_km
        );
    }

    #[test]
    fn test_sidereal_time_at_j2000() {
        // GMST at the J2000 epoch is 18.697 374 hours.
        let gst = EPH.sidereal_time(J2000).unwrap();
        assert!((gst - 18.6974).abs() < 0.01, "gmst {}", gst);
    }

    #[test]
    fn test_equatorial_in_range_for_all_bodies() {
        let observer = Observer {
            latitude: 40.0,
            longitude: -74.0,
        };
        for &body in Body::all() {
            let eq = EPH.equatorial(body, J2000, &observer).unwrap();
            assert!(
                (0.0..24.0).contains(&eq.right_ascension),
                "{} RA {}",
                body,
                eq.right_ascension
            );
            assert!(
                (-90.0..=90.0).contains(&eq.declination),
                "{} dec {}",
                body,
                eq.declination
            );
        }
    }

    #[test]
    fn test_kepler_solver_converges_for_pluto_eccentricity() {
        let m = 2.5;
        let e = 0.2488;
        let big_e = solve_kepler(m, e);
        assert!((big_e - e * big_e.sin() - m).abs() < 1e-8);
    }

    #[test]
    fn test_non_finite_jd_rejected() {
        assert!(EPH.solar_longitude(JulianDate::new(f64::NAN)).is_err());
        assert!(EPH
            .geocentric_vector(Body::Venus, JulianDate::new(f64::INFINITY))
            .is_err());
    }

    #[test]
    fn test_determinism() {
        let a = EPH.geocentric_vector(Body::Saturn, J2000).unwrap();
        let b = EPH.geocentric_vector(Body::Saturn, J2000).unwrap();
        assert_eq!(a, b);
    }
}
