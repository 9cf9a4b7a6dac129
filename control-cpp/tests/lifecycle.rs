use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use control_cpp::{Control, FloatKind, FullySpecifiedType, IntegerKind, OperatorKind};

/// Counts live allocations made by the current thread, so the test harness's
/// own threads do not disturb the balance.
struct CountingAllocator;

thread_local! {
  static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
  let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for CountingAllocator {
  unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
    let ptr = System.alloc(layout);
    if !ptr.is_null() {
      adjust(1);
    }
    ptr
  }

  unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
    adjust(-1);
    System.dealloc(ptr, layout)
  }

  unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
    System.realloc(ptr, layout, new_size)
  }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn live_allocations() -> isize {
  LIVE.with(|live| live.get())
}

fn populate(control: &mut Control) {
  let mut names = Vec::new();
  for idx in 0..64 {
    let id = control.find_or_insert_identifier(format!("ident{idx}"));
    names.push(control.name_id(id).unwrap());
    control.find_or_insert_string_literal(format!("\"s{idx}\""));
    control.find_or_insert_numeric_literal(format!("{idx}u"));
  }

  let int = control.integer_type(IntegerKind::Int);
  let double = control.float_type(FloatKind::Double);
  let mut element = FullySpecifiedType::new(int);
  for size in 0..32 {
    let arr = control.array_type(element, size);
    element = control.pointer_type(arr).into();
  }

  let vector = control.find_or_insert_identifier("vector");
  for window in names.windows(3) {
    let qualified = control.qualified_name_id(window, window[0] == names[0]);
    let named = control.named_type(qualified);
    control.pointer_to_member_type(window[1], named);
    control.template_name_id(vector, &[named.into(), double.into()]);
    control.selector_name_id(window, true);
  }
  control.operator_name_id(OperatorKind::ArrayAccess);
  control.conversion_name_id(element);

  let ns = control.new_namespace(0, names[0]);
  for (offset, name) in names.iter().enumerate() {
    let class = control.new_class(offset as u32, *name);
    control.enter_symbol(ns, class).unwrap();
    let method = control.new_function(offset as u32, *name);
    control.enter_symbol(class, method).unwrap();
    let block = control.new_block(offset as u32);
    control.enter_symbol(method, block).unwrap();
  }
}

#[test]
fn dropping_a_control_releases_everything_it_owns() {
  // Warm up one-time global state (hasher seeds, tracing callsites) so it is
  // not attributed to the measured session.
  {
    let mut control = Control::new();
    populate(&mut control);
  }

  let baseline = live_allocations();
  {
    let mut control = Control::new();
    populate(&mut control);
    let stats = control.stats();
    assert!(stats.owned_objects() > 0);
    assert!(live_allocations() > baseline);
  }
  assert_eq!(live_allocations(), baseline);
}

#[test]
fn sessions_are_independent() {
  let mut first = Control::new();
  let mut second = Control::new();

  let a = first.find_or_insert_identifier("only_in_first");
  assert_eq!(second.find_identifier("only_in_first"), None);

  let int_first = first.integer_type(IntegerKind::Int);
  let _ = second.float_type(FloatKind::Float);
  let int_second = second.integer_type(IntegerKind::Int);
  // Handles are per-session indices; the same shape may land elsewhere.
  assert_eq!(first.ty(int_first), second.ty(int_second));
  assert_ne!(int_first, int_second);

  drop(second);
  assert_eq!(first.identifier(a).as_str(), Some("only_in_first"));
}

#[test]
fn controls_can_move_across_threads() {
  let mut control = Control::new();
  let id = control.find_or_insert_identifier("shared");
  let handle = std::thread::spawn(move || {
    let name = control.name_id(id).unwrap();
    control.display_name(name).to_string()
  });
  assert_eq!(handle.join().unwrap(), "shared");
}
