//! Bed capacity estimation.
//!
//! Total beds are a heuristic, not ground truth: each organization's
//! historical encounter volume (all encounters, independent of the as-of
//! date) scaled by the configured factor and floored. A hospital with no
//! history at all borrows the mean volume across organizations so sparse
//! data cannot produce a zero-bed artifact.

use std::collections::HashMap;

use super::join::HospitalFilter;
use crate::models::Encounter;

/// Estimated bed capacity and its utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BedCapacity {
    pub total_beds: u64,
    pub available_beds: u64,
    /// Percentage in `[0, 100]`-ish (heuristic totals can be exceeded);
    /// `0.0` whenever `total_beds` is zero.
    pub occupancy_rate: f64,
}

/// Estimate capacity for the selected hospital scope.
///
/// Volumes always come from the full, unfiltered encounter table so the
/// estimate does not drift with the as-of date.
pub fn estimate_capacity(
    all_encounters: &[Encounter],
    filter: &HospitalFilter,
    bed_scaling_factor: f64,
    active_inpatient: usize,
) -> BedCapacity {
    let mut volume_by_org: HashMap<&str, u64> = HashMap::new();
    for encounter in all_encounters {
        *volume_by_org.entry(encounter.organization.as_str()).or_insert(0) += 1;
    }

    let beds_for = |volume: u64| (volume as f64 * bed_scaling_factor).floor() as u64;

    let total_beds = match filter {
        HospitalFilter::All => volume_by_org.values().map(|&v| beds_for(v)).sum(),
        HospitalFilter::Organization(org) => {
            match volume_by_org.get(org.as_str()) {
                Some(&volume) => beds_for(volume),
                // Unknown or history-less hospital: fall back to the mean
                // volume across organizations.
                None => {
                    if volume_by_org.is_empty() {
                        0
                    } else {
                        let mean = volume_by_org.values().sum::<u64>() as f64
                            / volume_by_org.len() as f64;
                        (mean * bed_scaling_factor).floor() as u64
                    }
                }
            }
        }
    };

    let active = active_inpatient as u64;
    let available_beds = total_beds.saturating_sub(active);
    // Guarded at the division site; a zero-bed estimate must never raise.
    let occupancy_rate = if total_beds > 0 {
        active as f64 / total_beds as f64 * 100.0
    } else {
        0.0
    };

    BedCapacity {
        total_beds,
        available_beds,
        occupancy_rate,
    }
}
