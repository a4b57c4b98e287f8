//! Static field templates of the three claim forms.

use crate::models::{FieldDescriptor, FormType};

pub const FORM_A_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("claimantName", "Name of Claimant(s)", true),
    FieldDescriptor::new("spouseName", "Name of Spouse", false),
    FieldDescriptor::new("fatherMotherName", "Name of Father/Mother", true),
    FieldDescriptor::new("address", "Address", true),
    FieldDescriptor::new("village", "Village", true),
    FieldDescriptor::new("gramPanchayat", "Gram Panchayat", true),
    FieldDescriptor::new("tehsil", "Tehsil/Taluka", true),
    FieldDescriptor::new("district", "District", true),
    FieldDescriptor::new("isScheduledTribe", "Scheduled Tribe (Yes/No)", true),
    FieldDescriptor::new("isOTFD", "Other Traditional Forest Dweller (Yes/No)", true),
    FieldDescriptor::new("familyMembers", "Family Members with Age", false),
    FieldDescriptor::new("extentForHabitation", "Extent of Forest Land for Habitation", false),
    FieldDescriptor::new(
        "extentForCultivation",
        "Extent of Forest Land for Self-Cultivation",
        false,
    ),
    FieldDescriptor::new("disputedLands", "Disputed Lands", false),
    FieldDescriptor::new("pattasLeases", "Pattas/Leases/Grants", false),
    FieldDescriptor::new("rehabilitationLand", "Land for In-Situ Rehabilitation", false),
    FieldDescriptor::new("displacedLand", "Land from where Displaced", false),
    FieldDescriptor::new("forestVillageLand", "Extent of Land in Forest Villages", false),
    FieldDescriptor::new("otherRights", "Any Other Traditional Right", false),
    FieldDescriptor::new("evidence", "Evidence in Support", true),
    FieldDescriptor::new("additionalInfo", "Any Other Information", false),
];

pub const FORM_B_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("claimantCommunity", "Name of Claimant Community", true),
    FieldDescriptor::new("isFDSTCommunity", "FDST Community (Yes/No)", true),
    FieldDescriptor::new("isOTFDCommunity", "OTFD Community (Yes/No)", true),
    FieldDescriptor::new("village", "Village", true),
    FieldDescriptor::new("gramPanchayat", "Gram Panchayat", true),
    FieldDescriptor::new("tehsil", "Tehsil/Taluka", true),
    FieldDescriptor::new("district", "District", true),
    FieldDescriptor::new("nistariRights", "Community Rights such as Nistar", false),
    FieldDescriptor::new("mfpRights", "Rights over Minor Forest Produce", false),
    FieldDescriptor::new("fishWaterRights", "Uses/Entitlements (Fish, Water Bodies)", false),
    FieldDescriptor::new("grazingRights", "Grazing Rights", false),
    FieldDescriptor::new(
        "nomadPastoralistRights",
        "Traditional Resource Access for Nomadic/Pastoralist",
        false,
    ),
    FieldDescriptor::new("habitatRights", "Community Tenures of Habitat for PTGs", false),
    FieldDescriptor::new(
        "biodiversityRights",
        "Right to Access Biodiversity/IP/Traditional Knowledge",
        false,
    ),
    FieldDescriptor::new("otherTraditionalRights", "Other Traditional Rights", false),
    FieldDescriptor::new("evidence", "Evidence in Support", true),
    FieldDescriptor::new("additionalInfo", "Any Other Information", false),
];

pub const FORM_C_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("village", "Village/Gram Sabha", true),
    FieldDescriptor::new("gramPanchayat", "Gram Panchayat", true),
    FieldDescriptor::new("tehsil", "Tehsil/Taluka", true),
    FieldDescriptor::new("district", "District", true),
    FieldDescriptor::new("gramSabhaMembers", "Names of Gram Sabha Members", true),
    FieldDescriptor::new("khasraNumbers", "Khasra/Compartment Numbers", false),
    FieldDescriptor::new("borderingVillages", "Bordering Villages", false),
    FieldDescriptor::new("evidence", "List of Evidence in Support", true),
];

pub fn template_for(form_type: FormType) -> &'static [FieldDescriptor] {
    match form_type {
        FormType::FormA => FORM_A_FIELDS,
        FormType::FormB => FORM_B_FIELDS,
        FormType::FormC => FORM_C_FIELDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_keys_unique() {
        for form_type in FormType::ALL {
            let keys: HashSet<_> = template_for(form_type).iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), template_for(form_type).len(), "{}", form_type);
        }
    }

    fn field(form_type: FormType, key: &str) -> Option<&'static FieldDescriptor> {
        template_for(form_type).iter().find(|field| field.key == key)
    }

    #[test]
    fn test_every_template_has_evidence() {
        for form_type in FormType::ALL {
            let evidence = field(form_type, "evidence").unwrap();
            assert!(evidence.required);
        }
    }

    #[test]
    fn test_form_c_labels() {
        assert_eq!(field(FormType::FormC, "village").unwrap().label, "Village/Gram Sabha");
        assert!(field(FormType::FormC, "claimantName").is_none());
    }
}
