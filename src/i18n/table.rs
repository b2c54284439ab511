//! 编译期内嵌的本地化字符串表
//!
//! 每个区域一张 `(key, text)` 表，所有区域的 key 集合必须一致，
//! 由单元测试与 `locales check` 命令校验。

pub(super) const PT_BR: &[(&str, &str)] = &[
    ("nav.home", "Início"),
    ("nav.news", "Notícias"),
    ("nav.ebooks", "E-books"),
    ("nav.technical_materials", "Materiais técnicos"),
    ("nav.media_kits", "Mídia kit"),
    ("nav.suppliers", "Fornecedores"),
    ("nav.foundries", "Fundições"),
    ("nav.events", "Eventos"),
    ("nav.search", "Busca"),
    ("nav.newsletter", "Newsletter"),
    ("region.switch", "Trocar região"),
    ("region.br", "Brasil"),
    ("region.mx", "México"),
    ("region.fr", "França"),
    ("common.loading", "Carregando..."),
    ("common.read_more", "Leia mais"),
    ("common.back", "Voltar"),
    ("common.empty", "Nenhum item encontrado."),
    ("common.not_found", "Conteúdo não encontrado."),
    ("common.error", "Ocorreu um erro. Tente novamente."),
    ("search.placeholder", "Buscar no portal"),
    ("search.results", "Resultados da busca"),
    ("search.no_results", "Nenhum resultado para a sua busca."),
    ("ads.label", "Publicidade"),
    ("download.title", "Baixe o material"),
    ("download.description", "Informe seu e-mail para receber o arquivo."),
    ("download.email_label", "E-mail"),
    ("download.email_placeholder", "seu@email.com"),
    ("download.submit", "Baixar"),
    ("download.submitting", "Enviando..."),
    ("download.success", "Obrigado! Seu download vai começar."),
    ("download.close", "Fechar"),
    ("download.error.invalid_email", "Informe um e-mail válido."),
    ("download.error.generic", "Não foi possível concluir. Tente novamente."),
    ("download.error.in_progress", "Seu envio já está em andamento."),
    ("newsletter.title", "Assine nossa newsletter"),
    ("newsletter.subscribe", "Assinar"),
    ("newsletter.success", "Inscrição confirmada!"),
    ("ebooks.title", "E-books"),
    ("technical_materials.title", "Materiais técnicos"),
    ("media_kits.title", "Mídia kit"),
    ("suppliers.title", "Guia de fornecedores"),
    ("foundries.title", "Guia de fundições"),
    ("events.title", "Agenda de eventos"),
    ("events.starts_at", "Data"),
    ("footer.rights", "Todos os direitos reservados."),
];

pub(super) const ES_MX: &[(&str, &str)] = &[
    ("nav.home", "Inicio"),
    ("nav.news", "Noticias"),
    ("nav.ebooks", "E-books"),
    ("nav.technical_materials", "Materiales técnicos"),
    ("nav.media_kits", "Media kit"),
    ("nav.suppliers", "Proveedores"),
    ("nav.foundries", "Fundiciones"),
    ("nav.events", "Eventos"),
    ("nav.search", "Buscar"),
    ("nav.newsletter", "Boletín"),
    ("region.switch", "Cambiar región"),
    ("region.br", "Brasil"),
    ("region.mx", "México"),
    ("region.fr", "Francia"),
    ("common.loading", "Cargando..."),
    ("common.read_more", "Leer más"),
    ("common.back", "Volver"),
    ("common.empty", "No se encontraron elementos."),
    ("common.not_found", "Contenido no encontrado."),
    ("common.error", "Ocurrió un error. Inténtalo de nuevo."),
    ("search.placeholder", "Buscar en el portal"),
    ("search.results", "Resultados de búsqueda"),
    ("search.no_results", "No hay resultados para tu búsqueda."),
    ("ads.label", "Publicidad"),
    ("download.title", "Descarga el material"),
    ("download.description", "Ingresa tu correo para recibir el archivo."),
    ("download.email_label", "Correo electrónico"),
    ("download.email_placeholder", "tu@correo.com"),
    ("download.submit", "Descargar"),
    ("download.submitting", "Enviando..."),
    ("download.success", "¡Gracias! Tu descarga comenzará."),
    ("download.close", "Cerrar"),
    ("download.error.invalid_email", "Ingresa un correo válido."),
    ("download.error.generic", "No fue posible completar. Inténtalo de nuevo."),
    ("download.error.in_progress", "Tu envío ya está en curso."),
    ("newsletter.title", "Suscríbete a nuestro boletín"),
    ("newsletter.subscribe", "Suscribirse"),
    ("newsletter.success", "¡Suscripción confirmada!"),
    ("ebooks.title", "E-books"),
    ("technical_materials.title", "Materiales técnicos"),
    ("media_kits.title", "Media kit"),
    ("suppliers.title", "Guía de proveedores"),
    ("foundries.title", "Guía de fundiciones"),
    ("events.title", "Agenda de eventos"),
    ("events.starts_at", "Fecha"),
    ("footer.rights", "Todos los derechos reservados."),
];

pub(super) const FR_FR: &[(&str, &str)] = &[
    ("nav.home", "Accueil"),
    ("nav.news", "Actualités"),
    ("nav.ebooks", "E-books"),
    ("nav.technical_materials", "Documents techniques"),
    ("nav.media_kits", "Kit média"),
    ("nav.suppliers", "Fournisseurs"),
    ("nav.foundries", "Fonderies"),
    ("nav.events", "Événements"),
    ("nav.search", "Recherche"),
    ("nav.newsletter", "Newsletter"),
    ("region.switch", "Changer de région"),
    ("region.br", "Brésil"),
    ("region.mx", "Mexique"),
    ("region.fr", "France"),
    ("common.loading", "Chargement..."),
    ("common.read_more", "Lire la suite"),
    ("common.back", "Retour"),
    ("common.empty", "Aucun élément trouvé."),
    ("common.not_found", "Contenu introuvable."),
    ("common.error", "Une erreur est survenue. Veuillez réessayer."),
    ("search.placeholder", "Rechercher sur le portail"),
    ("search.results", "Résultats de recherche"),
    ("search.no_results", "Aucun résultat pour votre recherche."),
    ("ads.label", "Publicité"),
    ("download.title", "Téléchargez le document"),
    ("download.description", "Indiquez votre e-mail pour recevoir le fichier."),
    ("download.email_label", "E-mail"),
    ("download.email_placeholder", "votre@email.fr"),
    ("download.submit", "Télécharger"),
    ("download.submitting", "Envoi..."),
    ("download.success", "Merci ! Votre téléchargement va commencer."),
    ("download.close", "Fermer"),
    ("download.error.invalid_email", "Veuillez saisir un e-mail valide."),
    ("download.error.generic", "Impossible de terminer. Veuillez réessayer."),
    ("download.error.in_progress", "Votre envoi est déjà en cours."),
    ("newsletter.title", "Abonnez-vous à notre newsletter"),
    ("newsletter.subscribe", "S'abonner"),
    ("newsletter.success", "Inscription confirmée !"),
    ("ebooks.title", "E-books"),
    ("technical_materials.title", "Documents techniques"),
    ("media_kits.title", "Kit média"),
    ("suppliers.title", "Annuaire des fournisseurs"),
    ("foundries.title", "Annuaire des fonderies"),
    ("events.title", "Agenda des événements"),
    ("events.starts_at", "Date"),
    ("footer.rights", "Tous droits réservés."),
];
