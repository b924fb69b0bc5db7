//! Shared gate library for the scenario tests.

#![allow(dead_code)]

use gatenet_netlist::{GateLibrary, GateType, GateTypeKind, Netlist, PinDirection, SequentialPins};
use std::sync::Arc;

pub fn test_library() -> GateLibrary {
    let mut lib = GateLibrary::new("test_library");
    lib.add(
        GateType::builder("gate_1_to_1", GateTypeKind::Combinational)
            .pin("I", PinDirection::Input)
            .pin("O", PinDirection::Output)
            .function("O", "!I")
            .build()
            .unwrap(),
    )
    .unwrap();
    lib.add(
        GateType::builder("gate_3_to_1", GateTypeKind::Combinational)
            .pins(["I0", "I1", "I2"], PinDirection::Input)
            .pin("O", PinDirection::Output)
            .function("O", "(I0 & I1) | I2")
            .build()
            .unwrap(),
    )
    .unwrap();
    lib.add(
        GateType::builder("gate_4_to_4", GateTypeKind::Other)
            .pins(["I0", "I1", "I2", "I3"], PinDirection::Input)
            .pins(["O0", "O1", "O2", "O3"], PinDirection::Output)
            .group("I", ["I0", "I1", "I2", "I3"])
            .group("O", ["O0", "O1", "O2", "O3"])
            .build()
            .unwrap(),
    )
    .unwrap();
    lib.add(
        GateType::builder("buffer_inout", GateTypeKind::Buffer)
            .pin("IO", PinDirection::InOut)
            .build()
            .unwrap(),
    )
    .unwrap();
    let roles = SequentialPins {
        clock: vec!["CLK".to_string()],
        data: vec!["D".to_string()],
        set_reset: vec!["RST".to_string()],
        state: vec!["Q".to_string()],
    };
    lib.add(
        GateType::builder("dff", GateTypeKind::Sequential(roles))
            .pins(["D", "CLK", "RST"], PinDirection::Input)
            .pin("Q", PinDirection::Output)
            .function("Q", "D")
            .build()
            .unwrap(),
    )
    .unwrap();
    lib
}

pub fn gate_type(lib: &GateLibrary, name: &str) -> Arc<GateType> {
    Arc::clone(lib.get(name).unwrap())
}

/// An empty netlist together with the test library.
pub fn empty_netlist() -> (Netlist, GateLibrary) {
    (Netlist::new("test_netlist"), test_library())
}
