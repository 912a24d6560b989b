//! Domain types shared by the codec tests.
//!
//! `Car` and `Bike` share their wheel count through `VehicleBase`, read and
//! written by plain helper functions.

use hydrate_node::{Describe, DomainValue, Mapping, Node, PayloadError};
use hydrate_registry::{Hydrate, TypeRegistry};

pub(crate) fn doc(text: &str) -> Node {
    Node::from_json_str(text).unwrap()
}

/// `{"json_class": tag, "data": payload}`.
pub(crate) fn tagged(tag: &str, payload: Node) -> Node {
    let mut map = Mapping::new();
    map.insert("json_class", tag.into());
    map.insert("data", payload);
    map.into()
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct VehicleBase {
    pub wheels: u64,
}

fn read_base(payload: &Mapping) -> Result<VehicleBase, PayloadError> {
    Ok(VehicleBase {
        wheels: payload.require_u64("wheels")?,
    })
}

fn write_base(base: &VehicleBase) -> Mapping {
    Mapping::from_iter([("wheels", Node::from(base.wheels))])
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Car {
    pub base: VehicleBase,
    pub year: i64,
}

impl Car {
    pub fn new(wheels: u64, year: i64) -> Self {
        Self {
            base: VehicleBase { wheels },
            year,
        }
    }
}

impl Describe for Car {
    fn tag(&self) -> &str {
        "Car"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        let mut map = write_base(&self.base);
        map.insert("year", self.year.into());
        Ok(map.into())
    }
}

impl Hydrate for Car {
    fn hydrate(payload: Node) -> Result<Self, PayloadError> {
        let map = payload.expect_mapping()?;
        Ok(Self {
            base: read_base(map)?,
            year: map.require_i64("year")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Bike {
    pub base: VehicleBase,
    pub country: String,
}

impl Bike {
    pub fn new(wheels: u64, country: &str) -> Self {
        Self {
            base: VehicleBase { wheels },
            country: country.into(),
        }
    }
}

impl Describe for Bike {
    fn tag(&self) -> &str {
        "Bike"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        let mut map = write_base(&self.base);
        map.insert("country", self.country.as_str().into());
        Ok(map.into())
    }
}

impl Hydrate for Bike {
    fn hydrate(payload: Node) -> Result<Self, PayloadError> {
        let map = payload.expect_mapping()?;
        Ok(Self {
            base: read_base(map)?,
            country: map.require_str("country")?.to_owned(),
        })
    }
}

/// Takes no payload fields.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Unicycle;

impl Describe for Unicycle {
    fn tag(&self) -> &str {
        "Unicycle"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        Ok(Mapping::new().into())
    }
}

impl Hydrate for Unicycle {
    fn hydrate(_payload: Node) -> Result<Self, PayloadError> {
        Ok(Self)
    }
}

fn read_objects(items: &[Node], field: &str) -> Result<Vec<DomainValue>, PayloadError> {
    items
        .iter()
        .map(|item| {
            item.as_object().cloned().ok_or_else(|| PayloadError::WrongType {
                field: field.to_owned(),
                expected: "object",
                found: item.kind(),
            })
        })
        .collect()
}

fn write_objects(values: &[DomainValue]) -> Node {
    Node::Sequence(values.iter().cloned().map(Node::Object).collect())
}

/// Holds any vehicles.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Garage {
    pub name: String,
    pub vehicles: Vec<DomainValue>,
}

impl Describe for Garage {
    fn tag(&self) -> &str {
        "Garage"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        let mut map = Mapping::new();
        map.insert("name", self.name.as_str().into());
        map.insert("vehicles", write_objects(&self.vehicles));
        Ok(map.into())
    }
}

impl Hydrate for Garage {
    fn hydrate(payload: Node) -> Result<Self, PayloadError> {
        let map = payload.expect_mapping()?;
        Ok(Self {
            name: map.require_str("name")?.to_owned(),
            vehicles: read_objects(map.require_sequence("vehicles")?, "vehicles")?,
        })
    }
}

/// Holds garages, giving three levels of tagged nesting.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Fleet {
    pub garages: Vec<DomainValue>,
}

impl Describe for Fleet {
    fn tag(&self) -> &str {
        "Fleet"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        Ok(write_objects(&self.garages))
    }
}

impl Hydrate for Fleet {
    fn hydrate(payload: Node) -> Result<Self, PayloadError> {
        Ok(Self {
            garages: read_objects(&payload.into_sequence()?, "garages")?,
        })
    }
}

/// Describes itself with a payload it can never produce.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Broken;

impl Describe for Broken {
    fn tag(&self) -> &str {
        "Broken"
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        Err(PayloadError::invalid("no payload"))
    }
}

pub(crate) fn vehicle_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_type::<Car>("Car");
    registry.register_type::<Bike>("Bike");
    registry.register_type::<Unicycle>("Unicycle");
    registry.register_type::<Garage>("Garage");
    registry.register_type::<Fleet>("Fleet");
    registry
}

pub(crate) fn sample_fleet() -> Fleet {
    let north = Garage {
        name: "north".into(),
        vehicles: vec![
            DomainValue::new(Car::new(4, 2023)),
            DomainValue::new(Bike::new(2, "Japan")),
        ],
    };
    let south = Garage {
        name: "south".into(),
        vehicles: vec![DomainValue::new(Unicycle)],
    };
    Fleet {
        garages: vec![DomainValue::new(north), DomainValue::new(south)],
    }
}
