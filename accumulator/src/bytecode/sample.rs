//! Static methods of the `SimpleMathWithLoop` class, as emitted by `javac`
//!
//! ```java
//! class SimpleMathWithLoop {
//!     private static int add(int a, int b) { return a + b; }
//!     private static int get_number() { return 2; }
//!     public static int testMe() {
//!         int summe = 3;
//!         for (int i = 0; i < 100; i++) {
//!             int x = get_number();
//!             summe = add(x, summe);
//!         }
//!         return summe;
//!     }
//!     public static void main(String[] argv) { /* same loop, 10 iterations */ }
//! }
//! ```

use super::{Class, Constant, Method};

pub const CLASS_NAME: &str = "SimpleMathWithLoop";

/// `iload_0; iload_1; iadd; ireturn`
pub const ADD: &[u8] = &[0x1a, 0x1b, 0x60, 0xac];

/// `iconst_2; ireturn`
pub const GET_NUMBER: &[u8] = &[0x05, 0xac];

/// Locals: 0 = summe, 1 = i, 2 = x
#[rustfmt::skip]
pub const TEST_ME: &[u8] = &[
    0x06,             //  0: iconst_3
    0x3b,             //  1: istore_0
    0x03,             //  2: iconst_0
    0x3c,             //  3: istore_1
    0x1b,             //  4: iload_1
    0x10, 0x64,       //  5: bipush 100
    0xa2, 0x00, 0x13, //  7: if_icmpge 26
    0xb8, 0x00, 0x02, // 10: invokestatic #2
    0x3d,             // 13: istore_2
    0x1c,             // 14: iload_2
    0x1a,             // 15: iload_0
    0xb8, 0x00, 0x03, // 16: invokestatic #3
    0x3b,             // 19: istore_0
    0x84, 0x01, 0x01, // 20: iinc 1, 1
    0xa7, 0xff, 0xed, // 23: goto 4
    0x1a,             // 26: iload_0
    0xac,             // 27: ireturn
];

/// Locals: 0 = argv, 1 = summe, 2 = i, 3 = x
#[rustfmt::skip]
pub const MAIN: &[u8] = &[
    0x06,             //  0: iconst_3
    0x3c,             //  1: istore_1
    0x03,             //  2: iconst_0
    0x3d,             //  3: istore_2
    0x1c,             //  4: iload_2
    0x10, 0x0a,       //  5: bipush 10
    0xa2, 0x00, 0x13, //  7: if_icmpge 26
    0xb8, 0x00, 0x02, // 10: invokestatic #2
    0x3e,             // 13: istore_3
    0x1d,             // 14: iload_3
    0x1b,             // 15: iload_1
    0xb8, 0x00, 0x03, // 16: invokestatic #3
    0x3c,             // 19: istore_1
    0x84, 0x02, 0x01, // 20: iinc 2, 1
    0xa7, 0xff, 0xed, // 23: goto 4
    0xb1,             // 26: return
];

/// Local variable slot holding `summe` once `main` returns
pub const MAIN_SUM_LOCAL: usize = 1;

fn method_ref(class: &str, name: &str, descriptor: &str) -> Constant {
    Constant::MethodRef {
        class: class.to_owned(),
        name: name.to_owned(),
        descriptor: descriptor.to_owned(),
    }
}

/// Build the class with the constant pool layout `javac` uses for it
pub fn simple_math_with_loop() -> Class {
    Class {
        name: CLASS_NAME.to_owned(),
        constants: vec![
            method_ref("java/lang/Object", "<init>", "()V"),
            method_ref(CLASS_NAME, "get_number", "()I"),
            method_ref(CLASS_NAME, "add", "(II)I"),
            Constant::Utf8(CLASS_NAME.to_owned()),
        ],
        methods: vec![
            Method::new("add", "(II)I", 2, ADD),
            Method::new("get_number", "()I", 0, GET_NUMBER),
            Method::new("testMe", "()I", 3, TEST_ME),
            Method::new("main", "([Ljava/lang/String;)V", 4, MAIN),
        ],
    }
}
