//! Parsing of `SLOT=NAME@PRICE` part specifications

use rigbook::RigbookError;
use rigbook::build::{ComponentSlot, Configuration};

/// A change to one component slot given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub slot: ComponentSlot,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl PartSpec {
    /// Parse `SLOT=NAME@PRICE`, `SLOT=NAME` or `SLOT=@PRICE`
    ///
    /// Only the text after the last `@` is read as the price, so names may contain `@`.
    pub fn parse(spec: &str) -> Result<Self, RigbookError> {
        let (slot, value) = spec
            .split_once('=')
            .ok_or_else(|| RigbookError::InvalidPartSpec(spec.to_string()))?;
        let slot: ComponentSlot = slot.trim().parse()?;

        let (name, price) = match value.rsplit_once('@') {
            Some((name, price)) => (name, Some(parse_price(price, spec)?)),
            None => (value, None),
        };
        let name = Some(name.trim()).filter(|n| !n.is_empty()).map(str::to_string);

        if name.is_none() && price.is_none() {
            return Err(RigbookError::InvalidPartSpec(spec.to_string()));
        }
        Ok(Self { slot, name, price })
    }

    /// Apply the change to `config`
    pub fn apply(&self, config: &mut Configuration) {
        let component = config.component_mut(self.slot);
        if let Some(name) = &self.name {
            component.name.clone_from(name);
        }
        if let Some(price) = self.price {
            component.price = price;
        }
    }
}

/// Parse a `SLOT=TEXT` note; empty text clears the note
pub fn parse_note(spec: &str) -> Result<(ComponentSlot, Option<String>), RigbookError> {
    let (slot, text) = spec
        .split_once('=')
        .ok_or_else(|| RigbookError::InvalidPartSpec(spec.to_string()))?;
    let slot: ComponentSlot = slot.trim().parse()?;
    let text = Some(text.trim()).filter(|t| !t.is_empty()).map(str::to_string);
    Ok((slot, text))
}

/// Parse a non-negative, finite amount
pub fn parse_amount(value: &str) -> Result<f64, String> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("'{value}' must be a non-negative amount"));
    }
    Ok(amount)
}

fn parse_price(value: &str, spec: &str) -> Result<f64, RigbookError> {
    parse_amount(value).map_err(|_| RigbookError::InvalidPartSpec(spec.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_and_price() {
        let spec = PartSpec::parse("cpu=Ryzen 7 7700X@329.90").unwrap();
        assert_eq!(spec.slot, ComponentSlot::Cpu);
        assert_eq!(spec.name.as_deref(), Some("Ryzen 7 7700X"));
        assert_eq!(spec.price, Some(329.90));
    }

    #[test]
    fn test_parse_name_only_and_price_only() {
        let name_only = PartSpec::parse("gpu=RTX 4070").unwrap();
        assert_eq!(name_only.slot, ComponentSlot::GraphicsCard);
        assert_eq!(name_only.price, None);

        let price_only = PartSpec::parse("power-supply=@89").unwrap();
        assert_eq!(price_only.name, None);
        assert_eq!(price_only.price, Some(89.0));
    }

    #[test]
    fn test_name_may_contain_at_sign() {
        let spec = PartSpec::parse("case=Lian Li @ home@120").unwrap();
        assert_eq!(spec.name.as_deref(), Some("Lian Li @ home"));
        assert_eq!(spec.price, Some(120.0));
    }

    #[test]
    fn test_rejects_bad_specs() {
        for bad in ["cpu", "cpu=", "cpu=x@abc", "cpu=x@-5", "floppy=x@1", "cpu=x@inf"] {
            assert!(PartSpec::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut config = Configuration::new("Rig");
        PartSpec::parse("ram=32GB DDR5@110").unwrap().apply(&mut config);
        PartSpec::parse("ram=@95").unwrap().apply(&mut config);
        assert_eq!(config.ram.name, "32GB DDR5");
        assert_eq!(config.ram.price, 95.0);
    }

    #[test]
    fn test_parse_note() {
        assert_eq!(
            parse_note("ssd=NVMe gen4").unwrap(),
            (ComponentSlot::Ssd, Some("NVMe gen4".to_string()))
        );
        assert_eq!(parse_note("ssd=").unwrap(), (ComponentSlot::Ssd, None));
        assert!(parse_note("ssd").is_err());
    }
}
