use super::*;

struct SomeType;

#[allow(dead_code)]
struct GenericType<T>(T);

#[test]
fn can_get_short_type_name() {
    assert_eq!(short_type_name::<SomeType>(), "SomeType");
    assert_eq!(short_type_name::<GenericType<Vec<usize>>>(), "GenericType");
    assert_eq!(short_type_name::<usize>(), "usize");
}

#[test]
fn can_format_floats() {
    assert_eq!(format_floats(&[1., 0.5]), "1.0000000,0.5000000");
    assert_eq!(format_floats(&[]), "");
}
