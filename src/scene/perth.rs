use crate::geo::corridor::Corridor;

/// Inner-city Perth corridors used when a scene names none.
pub(super) fn corridors() -> Vec<Corridor> {
    vec![
        Corridor::new(
            "Mounts Bay Rd",
            [
                [-31.9755360, 115.8180240],
                [-31.9733899, 115.8256410],
                [-31.9728911, 115.8265899],
                [-31.9726546, 115.8274435],
                [-31.9724305, 115.8289419],
                [-31.9722547, 115.8308715],
                [-31.9719219, 115.8321438],
                [-31.9715072, 115.8331964],
                [-31.9710934, 115.8336485],
                [-31.9704117, 115.8340935],
                [-31.9701018, 115.8345177],
                [-31.9696950, 115.8357989],
                [-31.9693711, 115.8365875],
                [-31.9689912, 115.8371631],
                [-31.9684943, 115.8377125],
                [-31.9678280, 115.8383774],
                [-31.9668462, 115.8390952],
                [-31.9662305, 115.8395033],
                [-31.9653717, 115.8398791],
            ],
        ),
        Corridor::new(
            "Stirling Hwy",
            [
                [-31.9820, 115.7900],
                [-31.9834402, 115.7802709],
                [-31.9850921, 115.7755445],
                [-31.9870, 115.7720],
                [-31.9890887, 115.7685801],
                [-31.9910607, 115.7675329],
                [-31.9925, 115.7665],
                [-31.993, 115.766],
                [-31.994, 115.765],
            ],
        ),
        Corridor::new(
            "Mitchell Fwy",
            [
                [-31.9617537, 115.8474375],
                [-31.9600697, 115.8474955],
                [-31.9586325, 115.8490672],
                [-31.9569363, 115.8494396],
                [-31.9553135, 115.8494540],
                [-31.9544093, 115.8488992],
                [-31.9527661, 115.8483345],
                [-31.9508178, 115.8490068],
                [-31.9493950, 115.8496822],
                [-31.9477915, 115.8501012],
                [-31.9460202, 115.8498387],
                [-31.9440531, 115.8485092],
                [-31.9412033, 115.8439939],
                [-31.9396551, 115.8405922],
                [-31.9379469, 115.8389929],
                [-31.9307069, 115.8350879],
                [-31.9261945, 115.8302721],
                [-31.9236279, 115.8269383],
                [-31.9194459, 115.8240925],
                [-31.9144881, 115.8233710],
                [-31.9106849, 115.8224215],
                [-31.9017170, 115.8208361],
                [-31.8990018, 115.8175891],
            ],
        ),
    ]
}
