//! Gate types shared by the unit tests.

use crate::gate_type::{GateLibrary, GateType, GateTypeKind, PinDirection, SequentialPins};
use std::sync::Arc;

fn build(ty: crate::gate_type::GateTypeBuilder) -> Arc<GateType> {
    Arc::new(ty.build().unwrap())
}

pub fn gate_1_to_1() -> Arc<GateType> {
    build(
        GateType::builder("gate_1_to_1", GateTypeKind::Combinational)
            .pin("I", PinDirection::Input)
            .pin("O", PinDirection::Output)
            .function("O", "!I"),
    )
}

pub fn gate_3_to_1() -> Arc<GateType> {
    build(
        GateType::builder("gate_3_to_1", GateTypeKind::Combinational)
            .pins(["I0", "I1", "I2"], PinDirection::Input)
            .pin("O", PinDirection::Output)
            .function("O", "I0 & I1 & I2"),
    )
}

pub fn gate_4_to_4() -> Arc<GateType> {
    build(
        GateType::builder("gate_4_to_4", GateTypeKind::Other)
            .pins(["I0", "I1", "I2", "I3"], PinDirection::Input)
            .pins(["O0", "O1", "O2", "O3"], PinDirection::Output),
    )
}

pub fn buffer_inout() -> Arc<GateType> {
    build(
        GateType::builder("buffer_inout", GateTypeKind::Buffer)
            .pin("IO", PinDirection::InOut),
    )
}

pub fn dff() -> Arc<GateType> {
    let roles = SequentialPins {
        clock: vec!["CLK".into()],
        data: vec!["D".into()],
        set_reset: Vec::new(),
        state: vec!["Q".into()],
    };
    build(
        GateType::builder("dff", GateTypeKind::Sequential(roles))
            .pin("D", PinDirection::Input)
            .pin("CLK", PinDirection::Input)
            .pin("Q", PinDirection::Output)
            .function("Q", "D"),
    )
}

pub fn library() -> GateLibrary {
    let mut lib = GateLibrary::new("test_library");
    for ty in [gate_1_to_1(), gate_3_to_1(), gate_4_to_4(), buffer_inout(), dff()] {
        lib.add((*ty).clone()).unwrap();
    }
    lib
}
