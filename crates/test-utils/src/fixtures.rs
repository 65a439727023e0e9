//! Common CSV input fixtures.
//!
//! The input format is one step value on the first line followed by one
//! comma-separated row of samples per line.

/// Two rows, a cliff between columns 1 and 2, step 5.
pub const CLIFF_CSV: &str = "5\n0,0,10,10\n0,0,10,10\n";

/// Small elevation sample with a shoreline (values at or below zero),
/// a lowland band and a hill.
pub const ELEVATION_CSV: &str = "\
0.5
-1.0, -0.5, 0.0, 0.2, 0.4
-0.5, 0.3, 0.8, 1.2, 1.0
0.0, 0.9, 2.1, 2.6, 1.4
0.2, 1.1, 2.4, 3.0, 1.8
0.1, 0.6, 1.3, 1.5, 0.9
";

/// Uniform plateau: no contour can cross it.
pub const PLATEAU_CSV: &str = "2\n7,7,7\n7,7,7\n7,7,7\n";

/// Rows of different lengths.
pub const RAGGED_CSV: &str = "1\n1,2,3\n4,5\n";

/// Step line that is not a number.
pub const BAD_STEP_CSV: &str = "step\n1,2\n3,4\n";
