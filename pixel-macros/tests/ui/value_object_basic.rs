use pixel_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object(debug = false)]
struct Label(String);

#[value_object]
enum Level {
    #[default]
    Low,
    High,
}

fn main() {
    let _ = format!("{:?}", Amount { value: 0 });
    let a = Amount::default();
    let _eq = a.clone() == Amount { value: 0 };

    // newtype 访问器
    let label = Label::new("pixel");
    assert_eq!(label.value(), "pixel");
    assert_eq!(label.to_string(), "pixel");
    let as_ref: &String = label.as_ref();
    assert_eq!(as_ref.len(), 5);
    let from: Label = String::from("x").into();
    assert_eq!(from.into_inner(), "x");

    let lv: Level = Default::default();
    assert!(lv == Level::Low);
    let _ = Level::High;
}
