use control_cpp::{Control, FloatKind, FullySpecifiedType, IntegerKind, OperatorKind};

#[test]
fn names_render_as_source_spelling() {
  let mut control = Control::new();
  let std_id = control.find_or_insert_identifier("std");
  let string_id = control.find_or_insert_identifier("string");
  let std_name = control.name_id(std_id).unwrap();
  let string_name = control.name_id(string_id).unwrap();

  let global = control.qualified_name_id(&[std_name, string_name], true);
  let local = control.qualified_name_id(&[std_name, string_name], false);
  let dtor = control.destructor_name_id(string_id).unwrap();

  assert_eq!(control.display_name(global).to_string(), "::std::string");
  assert_eq!(control.display_name(local).to_string(), "std::string");
  assert_eq!(control.display_name(dtor).to_string(), "~string");
}

#[test]
fn operator_names_render_with_keyword() {
  let mut control = Control::new();
  let plus = control.operator_name_id(OperatorKind::Plus);
  let call = control.operator_name_id(OperatorKind::FunctionCall);
  let new_array = control.operator_name_id(OperatorKind::NewArray);
  assert_eq!(control.display_name(plus).to_string(), "operator+");
  assert_eq!(control.display_name(call).to_string(), "operator()");
  assert_eq!(control.display_name(new_array).to_string(), "operator new[]");

  let int = control.integer_type(IntegerKind::Int);
  let int_ptr = control.pointer_type(int);
  let conversion = control.conversion_name_id(int_ptr);
  assert_eq!(control.display_name(conversion).to_string(), "operator int *");
}

#[test]
fn template_and_selector_names() {
  let mut control = Control::new();
  let map = control.find_or_insert_identifier("map");
  let int = control.integer_type(IntegerKind::Int);
  let double = control.float_type(FloatKind::Double);
  let templ = control.template_name_id(map, &[int.into(), double.into()]).unwrap();
  assert_eq!(control.display_name(templ).to_string(), "map<int, double>");

  let set_value = control.find_or_insert_identifier("setValue");
  let for_key = control.find_or_insert_identifier("forKey");
  let set_value = control.name_id(set_value).unwrap();
  let for_key = control.name_id(for_key).unwrap();
  let selector = control.selector_name_id(&[set_value, for_key], true);
  let unary = control.selector_name_id(&[set_value], false);
  assert_eq!(control.display_name(selector).to_string(), "setValue:forKey:");
  assert_eq!(control.display_name(unary).to_string(), "setValue");
}

#[test]
fn types_render_with_qualifiers() {
  let mut control = Control::new();
  let char_ty = control.integer_type(IntegerKind::Char);
  let const_char = FullySpecifiedType::new(char_ty).with_const();
  let ptr = control.pointer_type(const_char);
  let arr = control.array_type(char_ty, 16);
  let long_double = control.float_type(FloatKind::LongDouble);
  let reference = control.reference_type(long_double);

  assert_eq!(control.display_type(const_char).to_string(), "const char");
  assert_eq!(control.display_type(ptr).to_string(), "const char *");
  assert_eq!(
    control.display_type(FullySpecifiedType::new(ptr).with_const()).to_string(),
    "const char * const"
  );
  assert_eq!(control.display_type(arr).to_string(), "char [16]");
  assert_eq!(control.display_type(reference).to_string(), "long double &");
  assert_eq!(control.display_type(control.void_type()).to_string(), "void");
}

#[test]
fn member_pointers_and_named_types() {
  let mut control = Control::new();
  let widget = control.find_or_insert_identifier("Widget");
  let widget = control.name_id(widget).unwrap();
  let int = control.integer_type(IntegerKind::Int);
  let member = control.pointer_to_member_type(widget, int);
  let named = control.named_type(widget);
  assert_eq!(control.display_type(member).to_string(), "int Widget::*");
  assert_eq!(control.display_type(named).to_string(), "Widget");
}

#[test]
fn nested_declarators_use_c_syntax() {
  let mut control = Control::new();
  let char_ty = control.integer_type(IntegerKind::Char);
  let int = control.integer_type(IntegerKind::Int);
  let buffer = control.array_type(char_ty, 16);
  let to_buffer = control.pointer_type(buffer);
  let ref_buffer = control.reference_type(buffer);
  let char_ptr = control.pointer_type(char_ty);
  let argv = control.array_type(char_ptr, 4);
  let int_ptr = control.pointer_type(int);
  let int_ptr_ptr = control.pointer_type(int_ptr);
  let to_const_ptr = control.pointer_type(FullySpecifiedType::new(int_ptr).with_const());
  let const_buffer = FullySpecifiedType::new(buffer).with_const();

  assert_eq!(control.display_type(to_buffer).to_string(), "char (*)[16]");
  assert_eq!(control.display_type(ref_buffer).to_string(), "char (&)[16]");
  assert_eq!(control.display_type(argv).to_string(), "char *[4]");
  assert_eq!(control.display_type(int_ptr_ptr).to_string(), "int **");
  assert_eq!(control.display_type(to_const_ptr).to_string(), "int * const *");
  assert_eq!(control.display_type(const_buffer).to_string(), "const char [16]");

  let widget = control.find_or_insert_identifier("Widget");
  let widget = control.name_id(widget).unwrap();
  let member_buffer = control.pointer_to_member_type(widget, buffer);
  assert_eq!(
    control.display_type(member_buffer).to_string(),
    "char (Widget::*)[16]"
  );
}
