//! Deterministic traces shared by the unit tests.
//!
//! The noise is a fixed draw from a normal distribution with a standard deviation
//! of 0.001, stored inline so the fixtures do not depend on a random number
//! generator's stream.

pub const NOISE: [f64; 400] = [
    -0.000256, 0.000511, -0.000226, -0.000315, -0.00093, -0.000213, 0.001112, 0.000424,
    0.001037, 0.000249, 0.000395, 0.000185, -0.001666, 0.000855, 0.000506, 0.000499,
    -0.001691, -0.001744, -0.00089, -0.000468, 0.000305, -4.6e-05, 0.000521, -0.000642,
    0.000309, 0.000394, -0.000661, 0.001718, 0.000557, 0.001197, -0.00062, -0.00074,
    -0.000344, -0.000106, 0.000632, 0.000248, -0.000447, -0.000957, -0.000521, 0.001221,
    -0.000808, 0.000245, 0.000427, -0.00149, 4.8e-05, 0.001306, -0.002014, -0.000322,
    -0.000106, -0.000817, 0.000497, -6.2e-05, -0.001465, 0.000828, 0.000669, 0.000946,
    0.001441, 0.000362, 0.000119, -0.001299, 0.000615, -0.000612, -0.000453, -0.001265,
    -0.000968, -0.000531, 0.001289, -0.002032, -0.001458, 0.000239, 0.001443, 0.000578,
    -0.0019, -0.002518, 0.000357, -0.000736, -0.00112, 0.000977, 0.001102, 0.000157,
    0.000246, 0.000434, 0.001594, 0.000619, 0.000519, 0.000548, -0.001568, 0.001282,
    0.000955, 0.00053, -0.001974, -0.000634, 0.000842, -0.001811, -0.000184, 0.00102,
    -0.001311, 0.00161, 0.000552, -0.00015, 0.000325, 0.00065, 0.00012, 0.001146,
    -0.000662, -0.000415, 0.001042, 2.7e-05, -0.00088, 0.000946, 0.001465, -0.000445,
    -0.00138, -0.000135, -0.000149, -0.000298, 0.001405, -0.001027, 0.001261, -0.001268,
    -0.000787, 0.000632, 0.001129, 0.000859, 0.000345, 0.000142, 0.000152, 0.000575,
    -0.000176, 0.000277, 0.000573, 1e-06, 0.000764, 0.000566, 0.002011, 0.000325,
    -0.000428, -0.000373, -1.3e-05, 0.000924, -0.000337, 0.000386, 0.001837, -0.002565,
    -0.001124, 0.000244, 0.000398, 0.000239, -0.000431, 0.000655, 0.000282, -0.000522,
    0.00243, 0.000355, -0.000554, -9.9e-05, -0.000226, -6.3e-05, -0.002728, -0.000487,
    0.001009, -0.001169, -6.7e-05, 0.000954, 0.000856, 0.001491, -0.001701, -0.000353,
    -0.000341, 0.000623, 0.001092, -0.002683, 0.001089, -0.001448, 0.000683, -0.001492,
    0.000176, 0.001195, -0.000149, 0.000191, 0.000797, 0.000141, -8.8e-05, 0.001533,
    0.001048, -0.000294, 0.002745, -0.001147, 0.000915, -0.000266, 0.000132, 0.000705,
    0.000222, 0.000639, -0.001527, -0.00151, 0.000615, -0.000963, -0.001027, -0.00147,
    0.001266, 0.000747, 0.001473, -0.000938, 1e-06, -0.00114, 0.000766, 0.001589,
    -0.00089, 0.00156, 0.000988, -0.000178, -0.001972, 0.001407, -9.6e-05, -0.000603,
    0.0004, 0.00041, 0.001498, -0.00102, 0.001136, 0.001487, 0.001452, -0.000181,
    -0.000744, 0.001019, 0.000115, 0.000124, 0.001424, -0.000263, -0.002297, -0.000387,
    -0.001854, 0.000819, 0.000317, -0.000611, -1e-05, 0.000833, 7.9e-05, 0.001327,
    -6.1e-05, 0.00104, 0.001491, 0.00161, -0.000672, 0.00088, -0.001876, -0.001083,
    -0.001963, 0.001069, -0.001232, -1.3e-05, -0.000192, -2.9e-05, -0.000592, 0.000234,
    0.001791, 4.4e-05, 0.000531, 0.001001, -0.000198, -0.00126, -0.000555, 0.001074,
    -0.001646, -0.000598, 0.001007, 0.000793, 8e-06, 0.000805, 0.000166, -0.001179,
    -0.001564, -0.000639, 0.000923, -0.000566, -0.000902, -0.000771, -0.001532, -0.000117,
    -0.00118, 0.000364, -0.00236, 0.000328, -0.000642, -0.001942, 0.000725, -0.000276,
    -0.00223, -0.000875, 0.000291, -0.000459, 0.00078, 0.000748, 0.000666, 0.000327,
    0.001334, 0.00066, 0.000451, -0.002084, 0.000897, 0.001309, -0.000297, -0.00047,
    0.00194, -0.001758, 0.000469, 0.002424, -0.000928, 0.00069, 0.001886, -0.00012,
    0.000561, 0.000903, -0.000906, -8.9e-05, 0.000293, 0.000825, -3.5e-05, -0.000195,
    -0.001016, -0.000359, 0.000892, 0.000102, -0.000853, -0.000842, 0.002667, 0.00114,
    0.000637, -0.002593, 0.000621, 0.000481, 0.001684, 0.000428, -6.7e-05, 0.000522,
    -0.001944, 0.001033, 0.000325, -0.000702, 0.001326, 0.001809, -0.001402, -0.000666,
    0.000291, 0.000183, -0.000398, -0.000974, 0.00212, 0.001037, -0.001194, -0.001345,
    0.001703, 0.000989, 0.001821, 0.00081, -0.000872, 0.000261, -0.00216, -0.000748,
    -5.9e-05, 0.000523, -0.000728, -0.000124, 0.000459, 0.000377, 0.000638, 0.000209,
    -0.000324, 0.000789, 4.9e-05, -0.000826, -0.000626, -0.0, -0.00011, 0.000157,
    -0.0, 0.000176, -0.000134, -0.001258, 0.000421, 0.001054, 0.000435, -0.000189,
    0.000446, -0.000966, -0.001896, 6e-05, -0.00093, 0.00074, -0.001084, -0.002629,
    -0.00104, 0.001578, -0.000382, -0.001369, -0.000763, 0.000521, 0.000497, 0.000177,
];

/// Sample indices of the simulated particle dips
pub const DIPS: [usize; 5] = [60, 130, 190, 275, 340];

pub fn time_axis() -> Vec<f64> {
    (0..NOISE.len()).map(|i| i as f64 * 0.001).collect()
}

/// A slowly drifting baseline with five gaussian dips and additive noise
pub fn particle_trace() -> Vec<f64> {
    time_axis()
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let baseline = 0.02 + 0.05 * t - 0.03 * t * t;
            let dips: f64 = DIPS
                .iter()
                .map(|d| 0.05 * (-((i as f64 - *d as f64) / 4.0).powi(2)).exp())
                .sum();
            baseline - dips + NOISE[i]
        })
        .collect()
}

/// A low amplitude sine wave with the same noise
pub fn noisy_sine() -> Vec<f64> {
    NOISE
        .iter()
        .enumerate()
        .map(|(i, e)| (i as f64 * 0.3).sin() * 0.01 + e)
        .collect()
}
