//! Gate types: the immutable pin and behavior descriptions gates refer to.
//!
//! A [`GateType`] is shared between every gate of that type (and between
//! netlists) through an `Arc`. Gates never own or mutate their type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The fixed direction of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// Data flows into the gate.
    Input,
    /// Data flows out of the gate.
    Output,
    /// Bidirectional pin.
    InOut,
    /// Pin internal to the cell, never connected to a net.
    Internal,
}

impl PinDirection {
    /// Returns `true` if a pin of this direction may be a net source.
    pub fn can_drive(self) -> bool {
        matches!(self, PinDirection::Output | PinDirection::InOut)
    }

    /// Returns `true` if a pin of this direction may be a net destination.
    pub fn can_receive(self) -> bool {
        matches!(self, PinDirection::Input | PinDirection::InOut)
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PinDirection::Input => "input",
            PinDirection::Output => "output",
            PinDirection::InOut => "inout",
            PinDirection::Internal => "internal",
        })
    }
}

/// A named connection point on a gate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// The pin name, unique within its gate type.
    pub name: String,
    /// The fixed direction.
    pub direction: PinDirection,
}

/// An ordered, named group of pins (e.g. a data bus `D[3:0]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinGroup {
    /// The group name.
    pub name: String,
    /// Member pin names, in index order.
    pub pins: Vec<String>,
}

/// Pin roles of a sequential element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialPins {
    /// Clock input pins.
    pub clock: Vec<String>,
    /// Data input pins.
    pub data: Vec<String>,
    /// Asynchronous set/reset pins.
    pub set_reset: Vec<String>,
    /// State output pins.
    pub state: Vec<String>,
}

/// What kind of behavior a gate type has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateTypeKind {
    /// Stateless logic described by per-output Boolean functions.
    Combinational,
    /// A flip-flop or latch.
    Sequential(SequentialPins),
    /// A look-up table whose function is set per instance.
    Lut,
    /// A buffer or I/O pad.
    Buffer,
    /// A constant driver (`false` = ground, `true` = power).
    Constant(bool),
    /// Anything else (black boxes, hard macros).
    Other,
}

impl GateTypeKind {
    /// Returns `true` for sequential elements.
    pub fn is_sequential(&self) -> bool {
        matches!(self, GateTypeKind::Sequential(_))
    }
}

/// The read contract handed to an expression translator: one output pin of
/// a gate type with its ordered inputs and Boolean function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// The gate type name.
    pub gate_type: String,
    /// Input pin names in declaration order.
    pub inputs: Vec<String>,
    /// The output pin the function drives.
    pub output: String,
    /// The Boolean expression over `inputs`.
    pub function: String,
}

/// Errors raised while assembling gate types and libraries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateTypeError {
    /// A gate type or pin name was empty.
    #[error("gate type `{0}`: names must not be empty")]
    EmptyName(String),
    /// Two pins share a name.
    #[error("gate type `{gate_type}` declares pin `{pin}` twice")]
    DuplicatePin {
        /// Gate type name.
        gate_type: String,
        /// Duplicated pin.
        pin: String,
    },
    /// A group, role, or function refers to a pin the type does not declare.
    #[error("gate type `{gate_type}` refers to undeclared pin `{pin}`")]
    UndeclaredPin {
        /// Gate type name.
        gate_type: String,
        /// Missing pin.
        pin: String,
    },
    /// A Boolean function was attached to a pin that cannot drive.
    #[error("gate type `{gate_type}`: pin `{pin}` is not an output and cannot carry a function")]
    FunctionOnInput {
        /// Gate type name.
        gate_type: String,
        /// Offending pin.
        pin: String,
    },
    /// A library already holds a type with this name.
    #[error("gate library `{library}` already contains gate type `{gate_type}`")]
    DuplicateType {
        /// Library name.
        library: String,
        /// Duplicated type.
        gate_type: String,
    },
}

/// An immutable gate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateType {
    name: String,
    kind: GateTypeKind,
    pins: Vec<Pin>,
    groups: Vec<PinGroup>,
    functions: BTreeMap<String, String>,
}

impl GateType {
    /// Starts building a gate type.
    pub fn builder(name: impl Into<String>, kind: GateTypeKind) -> GateTypeBuilder {
        GateTypeBuilder {
            name: name.into(),
            kind,
            pins: Vec::new(),
            groups: Vec::new(),
            functions: BTreeMap::new(),
        }
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the behavior kind.
    pub fn kind(&self) -> &GateTypeKind {
        &self.kind
    }

    /// Returns all pins in declaration order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Looks up a pin by name.
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.name == name)
    }

    /// Returns the direction of the named pin.
    pub fn pin_direction(&self, name: &str) -> Option<PinDirection> {
        self.pin(name).map(|p| p.direction)
    }

    /// Iterates over the pins with the given direction, in declaration order.
    pub fn pins_with_direction(&self, direction: PinDirection) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(move |p| p.direction == direction)
    }

    /// Iterates over pins that may be net destinations (input and inout).
    pub fn input_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|p| p.direction.can_receive())
    }

    /// Iterates over pins that may be net sources (output and inout).
    pub fn output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().filter(|p| p.direction.can_drive())
    }

    /// Returns the pin groups.
    pub fn groups(&self) -> &[PinGroup] {
        &self.groups
    }

    /// Returns the group containing `pin` and the pin's index in it.
    pub fn group_of(&self, pin: &str) -> Option<(&PinGroup, usize)> {
        self.groups.iter().find_map(|g| {
            g.pins
                .iter()
                .position(|p| p == pin)
                .map(|index| (g, index))
        })
    }

    /// Returns the Boolean function driving an output pin.
    pub fn boolean_function(&self, output: &str) -> Option<&str> {
        self.functions.get(output).map(String::as_str)
    }

    /// Returns all Boolean functions keyed by output pin.
    pub fn boolean_functions(&self) -> &BTreeMap<String, String> {
        &self.functions
    }

    /// Returns the translator contract for one output pin, if it carries a function.
    pub fn function_signature(&self, output: &str) -> Option<FunctionSignature> {
        let function = self.functions.get(output)?;
        Some(FunctionSignature {
            gate_type: self.name.clone(),
            inputs: self
                .pins_with_direction(PinDirection::Input)
                .map(|p| p.name.clone())
                .collect(),
            output: output.to_string(),
            function: function.clone(),
        })
    }
}

/// Incremental, validating constructor for [`GateType`].
#[derive(Debug, Clone)]
pub struct GateTypeBuilder {
    name: String,
    kind: GateTypeKind,
    pins: Vec<Pin>,
    groups: Vec<PinGroup>,
    functions: BTreeMap<String, String>,
}

impl GateTypeBuilder {
    /// Declares a pin.
    pub fn pin(mut self, name: impl Into<String>, direction: PinDirection) -> Self {
        self.pins.push(Pin {
            name: name.into(),
            direction,
        });
        self
    }

    /// Declares several pins with the same direction.
    pub fn pins<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
        direction: PinDirection,
    ) -> Self {
        for name in names {
            self = self.pin(name, direction);
        }
        self
    }

    /// Declares a pin group over already declared pins.
    pub fn group<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        pins: impl IntoIterator<Item = S>,
    ) -> Self {
        self.groups.push(PinGroup {
            name: name.into(),
            pins: pins.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Attaches a Boolean function to an output pin.
    pub fn function(mut self, output: impl Into<String>, expr: impl Into<String>) -> Self {
        self.functions.insert(output.into(), expr.into());
        self
    }

    /// Validates and freezes the gate type.
    pub fn build(self) -> Result<GateType, GateTypeError> {
        if self.name.is_empty() {
            return Err(GateTypeError::EmptyName(self.name));
        }
        let undeclared = |pin: &str| GateTypeError::UndeclaredPin {
            gate_type: self.name.clone(),
            pin: pin.to_string(),
        };
        let mut seen = std::collections::HashSet::new();
        for pin in &self.pins {
            if pin.name.is_empty() {
                return Err(GateTypeError::EmptyName(self.name.clone()));
            }
            if !seen.insert(pin.name.as_str()) {
                return Err(GateTypeError::DuplicatePin {
                    gate_type: self.name.clone(),
                    pin: pin.name.clone(),
                });
            }
        }
        for member in self.groups.iter().flat_map(|g| g.pins.iter()) {
            if !seen.contains(member.as_str()) {
                return Err(undeclared(member));
            }
        }
        if let GateTypeKind::Sequential(roles) = &self.kind {
            let all = roles
                .clock
                .iter()
                .chain(&roles.data)
                .chain(&roles.set_reset)
                .chain(&roles.state);
            for pin in all {
                if !seen.contains(pin.as_str()) {
                    return Err(undeclared(pin));
                }
            }
        }
        for output in self.functions.keys() {
            let Some(pin) = self.pins.iter().find(|p| &p.name == output) else {
                return Err(undeclared(output));
            };
            if !pin.direction.can_drive() {
                return Err(GateTypeError::FunctionOnInput {
                    gate_type: self.name.clone(),
                    pin: output.clone(),
                });
            }
        }
        Ok(GateType {
            name: self.name,
            kind: self.kind,
            pins: self.pins,
            groups: self.groups,
            functions: self.functions,
        })
    }
}

/// A named collection of shared gate types.
#[derive(Debug, Clone, Default)]
pub struct GateLibrary {
    name: String,
    types: BTreeMap<String, Arc<GateType>>,
}

impl GateLibrary {
    /// Creates an empty library.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: BTreeMap::new(),
        }
    }

    /// Returns the library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a gate type and returns the shared handle to it.
    pub fn add(&mut self, gate_type: GateType) -> Result<Arc<GateType>, GateTypeError> {
        if self.types.contains_key(gate_type.name()) {
            return Err(GateTypeError::DuplicateType {
                library: self.name.clone(),
                gate_type: gate_type.name().to_string(),
            });
        }
        let shared = Arc::new(gate_type);
        self.types
            .insert(shared.name().to_string(), Arc::clone(&shared));
        Ok(shared)
    }

    /// Looks up a gate type by name.
    pub fn get(&self, name: &str) -> Option<&Arc<GateType>> {
        self.types.get(name)
    }

    /// Iterates over all gate types in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<GateType>> {
        self.types.values()
    }

    /// Returns the number of gate types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the library holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and2() -> GateType {
        GateType::builder("AND2", GateTypeKind::Combinational)
            .pins(["A", "B"], PinDirection::Input)
            .pin("Y", PinDirection::Output)
            .function("Y", "A & B")
            .build()
            .unwrap()
    }

    #[test]
    fn direction_roles() {
        assert!(PinDirection::Output.can_drive());
        assert!(PinDirection::InOut.can_drive());
        assert!(!PinDirection::Input.can_drive());
        assert!(!PinDirection::Internal.can_drive());
        assert!(PinDirection::Input.can_receive());
        assert!(PinDirection::InOut.can_receive());
        assert!(!PinDirection::Output.can_receive());
        assert!(!PinDirection::Internal.can_receive());
    }

    #[test]
    fn pin_lookup() {
        let t = and2();
        assert_eq!(t.pin_direction("A"), Some(PinDirection::Input));
        assert_eq!(t.pin_direction("Y"), Some(PinDirection::Output));
        assert_eq!(t.pin_direction("Z"), None);
        let inputs: Vec<_> = t.input_pins().map(|p| p.name.as_str()).collect();
        assert_eq!(inputs, vec!["A", "B"]);
    }

    #[test]
    fn signature_lists_ordered_inputs() {
        let sig = and2().function_signature("Y").unwrap();
        assert_eq!(sig.gate_type, "AND2");
        assert_eq!(sig.inputs, vec!["A", "B"]);
        assert_eq!(sig.output, "Y");
        assert_eq!(sig.function, "A & B");
        assert!(and2().function_signature("A").is_none());
    }

    #[test]
    fn groups_report_index() {
        let t = GateType::builder("BUF4", GateTypeKind::Buffer)
            .pins(["D0", "D1", "D2", "D3"], PinDirection::Input)
            .pins(["Q0", "Q1", "Q2", "Q3"], PinDirection::Output)
            .group("D", ["D0", "D1", "D2", "D3"])
            .build()
            .unwrap();
        let (group, index) = t.group_of("D2").unwrap();
        assert_eq!(group.name, "D");
        assert_eq!(index, 2);
        assert!(t.group_of("Q0").is_none());
    }

    #[test]
    fn duplicate_pin_rejected() {
        let err = GateType::builder("BAD", GateTypeKind::Other)
            .pin("A", PinDirection::Input)
            .pin("A", PinDirection::Output)
            .build()
            .unwrap_err();
        assert!(matches!(err, GateTypeError::DuplicatePin { .. }));
    }

    #[test]
    fn function_on_input_rejected() {
        let err = GateType::builder("BAD", GateTypeKind::Combinational)
            .pin("A", PinDirection::Input)
            .function("A", "1")
            .build()
            .unwrap_err();
        assert!(matches!(err, GateTypeError::FunctionOnInput { .. }));
    }

    #[test]
    fn sequential_roles_must_exist() {
        let roles = SequentialPins {
            clock: vec!["CLK".to_string()],
            ..SequentialPins::default()
        };
        let err = GateType::builder("DFF", GateTypeKind::Sequential(roles))
            .pin("D", PinDirection::Input)
            .build()
            .unwrap_err();
        assert!(matches!(err, GateTypeError::UndeclaredPin { pin, .. } if pin == "CLK"));
    }

    #[test]
    fn library_rejects_duplicates() {
        let mut lib = GateLibrary::new("test_lib");
        let shared = lib.add(and2()).unwrap();
        assert!(Arc::ptr_eq(&shared, lib.get("AND2").unwrap()));
        let err = lib.add(and2()).unwrap_err();
        assert!(matches!(err, GateTypeError::DuplicateType { .. }));
        assert_eq!(lib.len(), 1);
    }
}
