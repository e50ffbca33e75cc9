use envshaper::shape::{INVERTED_EXPONENTIAL, LINEAR, SHAPE_TABLE_LEN, TABLE_SIZE};
use envshaper::{ShapeTable, shape_table};

static GENTLE: ShapeTable = ShapeTable::from_array(shape_table!("inverted_exponential(1.5)"));

#[test]
fn test_shape_macro_length_and_endpoints() {
    let values: [i16; SHAPE_TABLE_LEN] = shape_table!("s_curve");
    assert_eq!(values[0], 0);
    assert_eq!(values[TABLE_SIZE], 32767);
    assert_eq!(values[TABLE_SIZE / 2], 16384);
}

#[test]
fn test_shape_macro_linear_matches_builtin() {
    let values: [i16; SHAPE_TABLE_LEN] = shape_table!("linear");
    assert_eq!(&values, LINEAR.samples());
}

#[test]
fn test_shape_macro_steepness_changes_curve() {
    let quarter = TABLE_SIZE / 4;
    // Lower steepness sits between the straight line and the default curve
    assert!(GENTLE.samples()[quarter] > LINEAR.samples()[quarter]);
    assert!(GENTLE.samples()[quarter] < INVERTED_EXPONENTIAL.samples()[quarter]);
}

#[test]
fn test_shape_macro_default_steepness() {
    let values: [i16; SHAPE_TABLE_LEN] = shape_table!("inverted_exponential");
    assert_eq!(&values, INVERTED_EXPONENTIAL.samples());
}
